//! Keyboard shortcuts

use super::Editor;
use crate::state::mode::InteractionMode;
use crate::state::transform::{apply_step, StepKey};

fn step_key(key: &str) -> Option<StepKey> {
    match key {
        "ArrowLeft" => Some(StepKey::Left),
        "ArrowRight" => Some(StepKey::Right),
        "ArrowUp" => Some(StepKey::Up),
        "ArrowDown" => Some(StepKey::Down),
        _ => match key.to_ascii_lowercase().as_str() {
            "a" => Some(StepKey::Left),
            "d" => Some(StepKey::Right),
            "w" => Some(StepKey::Up),
            "s" => Some(StepKey::Down),
            _ => None,
        },
    }
}

impl Editor {
    /// Handle a key press. `key` uses DOM key names (`"ArrowLeft"`, `"Escape"`,
    /// `"z"`). `ctrl` covers Ctrl and Cmd. Returns whether the key was consumed.
    pub fn key(&mut self, key: &str, ctrl: bool, shift: bool) -> bool {
        if ctrl {
            return match key.to_ascii_lowercase().as_str() {
                "z" if shift => self.redo(),
                "z" => self.undo(),
                "y" => self.redo(),
                _ => false,
            };
        }

        match key {
            "Delete" | "Backspace" => self.delete_selected().is_some(),
            "Escape" => {
                let had_draft = self.draft.is_some();
                self.set_mode(InteractionMode::Idle);
                if had_draft {
                    self.emit_sketches();
                }
                self.clear_selection();
                true
            }
            _ => match step_key(key) {
                Some(step) => self.step(step),
                None => false,
            },
        }
    }

    /// One discrete transform step on the primary selection's owner
    fn step(&mut self, key: StepKey) -> bool {
        let Some(mode) = self.mode.transform_mode() else {
            return false;
        };
        if self.transform.is_dragging() {
            return false;
        }
        let Some(shape) = self.target_shape() else {
            return false;
        };
        let id = shape.id.clone();
        let next = apply_step(
            mode,
            shape.transform,
            key,
            &self.settings.transform,
            &self.settings.snap,
        );
        let changed = self.scene.step_transform(&id, next);
        self.sync_history();
        changed
    }
}
