//! Editing commands issued by the host UI

use glam::Vec3;
use tracing::{info, warn};

use super::Editor;
use crate::codec::{self, CodecError};
use crate::state::mode::{InteractionMode, TransformMode};
use crate::state::scene::{DimensionEdit, SketchEdit};
use crate::state::selection::SelectionTarget;
use crate::state::shape::{PrimitiveKind, ShapeId};
use crate::state::sketch::SketchTool;
use crate::state::transform::snap_ground;

impl Editor {
    // ── Modes ──────────────────────────────────────────────────

    /// Place a primitive at `at` right away, or arm placement for the next
    /// ground click when `at` is `None`.
    pub fn create_shape(&mut self, kind: PrimitiveKind, at: Option<Vec3>) -> Option<ShapeId> {
        let Some(at) = at else {
            self.set_mode(InteractionMode::Placing(kind));
            return None;
        };
        if !at.is_finite() {
            warn!(?at, "Ignoring placement at non-finite point");
            return None;
        }
        let id = self
            .scene
            .create_primitive(kind, snap_ground(at, &self.settings.snap));
        self.set_mode(InteractionMode::Idle);
        self.select_target(SelectionTarget::Shape(id.clone()));
        self.sync_history();
        Some(id)
    }

    /// Enter a transform mode; the active mode again (or `None`) returns to idle
    pub fn set_transform_mode(&mut self, mode: Option<TransformMode>) {
        let next = match mode {
            Some(m) if self.mode != InteractionMode::Transforming(m) => {
                InteractionMode::Transforming(m)
            }
            _ => InteractionMode::Idle,
        };
        self.set_mode(next);
    }

    pub fn set_sketch_mode(&mut self, enabled: bool) {
        if enabled {
            if !self.mode.is_sketching() {
                self.set_mode(InteractionMode::Sketching(None));
            }
        } else if self.mode.is_sketching() {
            let had_draft = self.draft.is_some();
            self.set_mode(InteractionMode::Idle);
            if had_draft {
                self.emit_sketches();
            }
        }
    }

    /// Choose the sketch tool; `None` stays in sketch mode without a tool
    pub fn set_sketch_tool(&mut self, tool: Option<SketchTool>) {
        let had_draft = self.draft.is_some();
        self.set_mode(InteractionMode::Sketching(tool));
        if had_draft && self.draft.is_none() {
            self.emit_sketches();
        }
    }

    // ── Sketches ───────────────────────────────────────────────

    /// Extrude the sketch at `index` and select the resulting solid
    pub fn extrude(&mut self, index: usize, height: f32) -> Option<ShapeId> {
        let id = self.scene.extrude_sketch(index, height)?;
        self.emit_sketches();
        self.select_target(SelectionTarget::Shape(id.clone()));
        self.sync_history();
        Some(id)
    }

    pub fn update_sketch(&mut self, index: usize, edit: SketchEdit) -> bool {
        let changed = self.scene.update_sketch(index, edit);
        if changed {
            self.emit_sketches();
            self.sync_history();
        }
        changed
    }

    // ── Shape properties ───────────────────────────────────────

    pub fn update_shape(&mut self, edit: DimensionEdit) -> bool {
        let Some(id) = self.selection.owner().cloned() else {
            return false;
        };
        let changed = self.scene.update_dimensions(&id, edit);
        self.sync_history();
        changed
    }

    pub fn set_shape_color(&mut self, color: u32) -> bool {
        let Some(id) = self.selection.owner().cloned() else {
            return false;
        };
        let changed = self.scene.set_color(&id, color);
        self.sync_history();
        changed
    }

    pub fn set_shape_transform(
        &mut self,
        position: Option<Vec3>,
        rotation: Option<Vec3>,
        scale: Option<Vec3>,
    ) -> bool {
        let Some(id) = self.selection.owner().cloned() else {
            return false;
        };
        let changed = self.scene.set_transform(&id, position, rotation, scale);
        self.sync_history();
        changed
    }

    // ── Selection and structure ────────────────────────────────

    /// Select a top-level shape by id (scene tree). Unknown ids are ignored.
    pub fn select_shape(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if self.scene.get(id).is_some() => {
                self.select_target(SelectionTarget::Shape(id.to_string()));
                true
            }
            Some(_) => false,
            None => {
                self.clear_selection();
                true
            }
        }
    }

    /// Delete the primary selection's owning shape
    pub fn delete_selected(&mut self) -> Option<ShapeId> {
        let id = self.selection.owner().cloned()?;
        self.transform.end();
        let removed = self.scene.remove_shape(&id)?;
        self.prune_selection();
        self.sync_history();
        Some(removed.id)
    }

    pub fn clear_scene(&mut self) {
        let had_sketches = !self.scene.sketches().is_empty();
        self.transform.end();
        self.scene.clear();
        self.clear_selection();
        if had_sketches {
            self.emit_sketches();
        }
        self.sync_history();
    }

    /// Group the multi-selected shapes and select the new group
    pub fn group_selected(&mut self) -> Option<ShapeId> {
        let members = self.selection.multi().to_vec();
        let id = self.scene.group(&members)?;
        self.select_target(SelectionTarget::Shape(id.clone()));
        self.sync_history();
        Some(id)
    }

    /// Dissolve the selected group; its former children become the multi-selection
    pub fn ungroup_selected(&mut self) -> Option<Vec<ShapeId>> {
        let id = self.selection.owner().cloned()?;
        let children = self.scene.ungroup(&id)?;
        self.selection.clear();
        for child in &children {
            self.selection.toggle_multi(child.clone());
        }
        self.emit_selection();
        self.sync_history();
        Some(children)
    }

    // ── History ────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.transform.end();
        let done = self.scene.undo();
        if done {
            self.after_restore();
        }
        done
    }

    pub fn redo(&mut self) -> bool {
        self.transform.end();
        let done = self.scene.redo();
        if done {
            self.after_restore();
        }
        done
    }

    /// Every entity was rebuilt; old references are invalid
    fn after_restore(&mut self) {
        self.selection.clear();
        self.emit_selection();
        self.emit_sketches();
        self.sync_history();
    }

    // ── Scene I/O ──────────────────────────────────────────────

    pub fn export_scene(&self) -> Result<String, CodecError> {
        codec::to_json(&self.scene.document())
    }

    /// Replace the scene with a document. An unparseable document leaves the
    /// scene untouched.
    pub fn import_scene(&mut self, json: &str) -> Result<(), CodecError> {
        let doc = codec::from_json(json)?;
        self.transform.end();
        self.draft = None;
        self.scene.import_document(&doc);
        self.after_restore();
        Ok(())
    }

    /// Replace the scene with the last autosave without recording history
    #[cfg(not(target_arch = "wasm32"))]
    pub fn resume_autosave(&mut self) -> bool {
        let Some(decoded) = crate::state::SceneState::load_autosave() else {
            return false;
        };
        self.transform.end();
        self.draft = None;
        self.scene.replace_all(decoded);
        self.after_restore();
        true
    }

    // ── Settings ───────────────────────────────────────────────

    pub fn set_snap_to_grid(&mut self, enabled: bool) {
        self.settings.snap.enabled = enabled;
    }

    /// Set the grid size. Non-finite or non-positive sizes are ignored.
    pub fn set_grid_size(&mut self, size: f32) -> bool {
        if !(size.is_finite() && size > 0.0) {
            warn!(size, "Ignoring invalid grid size");
            return false;
        }
        self.settings.snap.grid_size = size;
        info!(size, "Grid size changed");
        true
    }
}
