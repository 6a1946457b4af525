//! Transform/drag operations

use tracing::warn;

use super::SceneState;
use crate::state::shape::Transform;

impl SceneState {
    /// Save undo state once at the beginning of a drag operation
    pub fn begin_drag(&mut self) {
        self.save_undo();
        self.version += 1;
    }

    /// Move a shape during a drag. No history; the pre-drag snapshot covers it.
    pub fn drag_to(&mut self, id: &str, transform: Transform) -> bool {
        if !transform.is_finite() {
            warn!(%id, "Ignoring non-finite transform");
            return false;
        }
        let Some(shape) = self.get_mut(id) else {
            return false;
        };
        if shape.transform == transform {
            return false;
        }
        shape.transform = transform;
        self.version += 1;
        true
    }

    /// One discrete key step, with its own history snapshot
    pub fn step_transform(&mut self, id: &str, transform: Transform) -> bool {
        if !transform.is_finite() {
            warn!(%id, "Ignoring non-finite transform");
            return false;
        }
        if self.get(id).is_none_or(|s| s.transform == transform) {
            return false;
        }
        self.save_undo();
        self.drag_to(id, transform)
    }
}
