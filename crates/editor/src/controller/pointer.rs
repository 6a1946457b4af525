//! Pointer handling: placement, sketch capture, drags and picking

use glam::{Vec2, Vec3};
use tracing::debug;

use super::Editor;
use crate::state::mode::{InteractionMode, TransformMode};
use crate::state::selection::SelectionTarget;
use crate::state::sketch::SketchDraft;
use crate::state::transform::{apply_drag, snap_ground, DragAnchor, DragSession};
use crate::viewport::edge::pick_edge_2d;
use crate::viewport::picking::{cast_scene, ray_ground};

/// Modifier keys held during a pointer event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl or Cmd: face picking
    pub ctrl: bool,
    /// Shift: toggle whole shapes in the multi-selection
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        shift: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        ctrl: false,
        shift: true,
    };
}

impl Editor {
    /// Ground-plane point under the pointer
    fn ground_at(&self, screen: Vec2) -> Option<Vec3> {
        ray_ground(&self.camera.screen_ray(screen, self.viewport), 0.0)
    }

    pub fn pointer_down(&mut self, screen: Vec2, mods: Modifiers) {
        match self.mode {
            InteractionMode::Idle => self.click(screen, mods),
            InteractionMode::Placing(kind) => {
                let Some(point) = self.ground_at(screen) else {
                    return;
                };
                let at = snap_ground(point, &self.settings.snap);
                let id = self.scene.create_primitive(kind, at);
                self.set_mode(InteractionMode::Idle);
                self.select_target(SelectionTarget::Shape(id));
                self.sync_history();
            }
            InteractionMode::Sketching(Some(tool)) => {
                if let Some(point) = self.ground_at(screen) {
                    let anchor = snap_ground(point, &self.settings.snap);
                    self.draft = Some(SketchDraft::new(tool, anchor));
                    self.ui_version += 1;
                }
            }
            InteractionMode::Sketching(None) => {}
            InteractionMode::Transforming(mode) => {
                if !self.begin_drag(mode, screen) {
                    self.click(screen, mods);
                }
            }
        }
    }

    pub fn pointer_move(&mut self, screen: Vec2) {
        if let Some(session) = self.transform.session() {
            let ground = match session.mode {
                TransformMode::Translate => self.ground_at(screen),
                _ => None,
            };
            let next = apply_drag(
                session,
                ground,
                screen,
                &self.settings.transform,
                &self.settings.snap,
            );
            if let Some(next) = next {
                let id = session.shape.clone();
                self.scene.drag_to(&id, next);
            }
            return;
        }

        if self.draft.is_some() {
            if let Some(point) = self.ground_at(screen) {
                let point = snap_ground(point, &self.settings.snap);
                if let Some(draft) = &mut self.draft {
                    draft.update(point);
                    self.ui_version += 1;
                }
            }
        }
    }

    /// Release ends a drag (keeping its result) or commits the sketch draft
    pub fn pointer_up(&mut self, screen: Vec2) {
        self.pointer_move(screen);

        if let Some(session) = self.transform.end() {
            debug!(shape = %session.shape, mode = ?session.mode, "Drag finished");
            return;
        }

        if let Some(draft) = self.draft.take() {
            self.ui_version += 1;
            if let Some(sketch) = draft.finish() {
                self.scene.commit_sketch(sketch);
                self.sync_history();
            } else {
                debug!("Discarding sketch below minimum size");
            }
            self.emit_sketches();
        }
    }

    /// Start dragging the primary selection's owner. False when nothing is selected.
    fn begin_drag(&mut self, mode: TransformMode, screen: Vec2) -> bool {
        let Some(shape) = self.target_shape() else {
            return false;
        };
        let anchor = match mode {
            TransformMode::Translate => match self.ground_at(screen) {
                Some(point) => DragAnchor::Ground(point),
                None => return true,
            },
            TransformMode::Rotate | TransformMode::Scale => DragAnchor::Screen(screen),
        };
        let session = DragSession {
            shape: shape.id.clone(),
            mode,
            start: shape.transform,
            anchor,
        };

        self.scene.begin_drag();
        self.transform.begin(session);
        self.sync_history();
        true
    }

    /// Resolve a pointer position to a selection target.
    ///
    /// The nearest hit owns the candidate shape. Ctrl picks the hit triangle's
    /// face; otherwise the closest projected edge within the pixel threshold
    /// wins; otherwise the whole shape.
    pub fn resolve_pick(&self, screen: Vec2, face_pick: bool) -> Option<SelectionTarget> {
        let ray = self.camera.screen_ray(screen, self.viewport);
        let hit = cast_scene(&ray, self.scene.shapes())?;
        let candidate = &self.scene.shapes()[hit.top_index];
        let id = candidate.id.clone();

        if face_pick {
            if hit.on_top_mesh && hit.triangle_index < candidate.faces().len() {
                return Some(SelectionTarget::Face {
                    shape: id,
                    index: hit.triangle_index,
                });
            }
        } else if let Some(edge) = pick_edge_2d(
            screen,
            candidate.edges(),
            &candidate.transform.matrix(),
            &self.camera,
            self.viewport,
            self.settings.picking.edge_threshold_px,
        ) {
            return Some(SelectionTarget::Edge {
                shape: id,
                index: edge.edge_index,
            });
        }

        Some(SelectionTarget::Shape(id))
    }

    fn click(&mut self, screen: Vec2, mods: Modifiers) {
        let target = self.resolve_pick(screen, mods.ctrl && !mods.shift);
        debug!(?target, ?mods, "Pointer pick");

        match (target, mods.shift) {
            (Some(target), true) => {
                self.selection.toggle_multi(target.shape().clone());
                self.emit_selection();
            }
            (None, true) => {}
            (Some(target), false) => self.select_target(target),
            (None, false) => {
                self.selection.clear();
                self.emit_selection();
            }
        }
    }
}
