//! Undo/redo functionality
//!
//! Restoring a snapshot rebuilds every shape and sketch from serialized data,
//! so any outside reference to the previous entities must be dropped by the
//! caller.

use tracing::error;

use super::SceneState;
use crate::codec;

impl SceneState {
    /// Undo last change
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.undo_stack.pop() else {
            return false;
        };
        match self.swap_with(&prev) {
            Some(current) => {
                self.redo_stack.push(current);
                self.history_revision += 1;
                true
            }
            None => {
                self.undo_stack.push(prev);
                false
            }
        }
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        match self.swap_with(&next) {
            Some(current) => {
                self.undo_stack.push(current);
                self.history_revision += 1;
                true
            }
            None => {
                self.redo_stack.push(next);
                false
            }
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Restore `snapshot`, returning the serialized state it replaced.
    /// Leaves the scene and both stacks untouched on failure.
    fn swap_with(&mut self, snapshot: &str) -> Option<String> {
        let doc = match codec::from_json(snapshot) {
            Ok(doc) => doc,
            Err(e) => {
                error!("Discarding history step: {e}");
                return None;
            }
        };
        let current = match self.snapshot() {
            Ok(current) => current,
            Err(e) => {
                error!("Cannot capture current scene for history: {e}");
                return None;
            }
        };
        self.replace_all(codec::decode(&doc));
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use glam::Vec3;

    #[test]
    fn test_undo_redo_add() {
        let mut scene = SceneState::default();
        scene.add_shape(fixtures::box_shape("a", Vec3::ZERO));
        assert!(scene.can_undo());

        assert!(scene.undo());
        assert!(scene.shapes().is_empty());
        assert!(scene.can_redo());

        assert!(scene.redo());
        assert_eq!(scene.shapes()[0].id, "a");
        assert!(!scene.can_redo());
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut scene = SceneState::default();
        scene.add_shape(fixtures::box_shape("a", Vec3::ZERO));
        scene.undo();
        scene.add_shape(fixtures::box_shape("b", Vec3::ZERO));
        assert!(!scene.can_redo());
    }

    #[test]
    fn test_history_limit() {
        let mut scene = SceneState::with_history_limit(3);
        for i in 0..5 {
            scene.add_shape(fixtures::box_shape(&format!("s{i}"), Vec3::ZERO));
        }
        assert_eq!(scene.undo_stack.len(), 3);
        while scene.undo() {}
        assert_eq!(scene.shapes().len(), 2);
    }

    #[test]
    fn test_corrupt_snapshot_leaves_state_alone() {
        let mut scene = SceneState::default();
        scene.add_shape(fixtures::box_shape("a", Vec3::ZERO));
        scene.undo_stack.push("not json".into());
        assert!(!scene.undo());
        assert_eq!(scene.undo_stack.len(), 2);
        assert_eq!(scene.shapes().len(), 1);
        assert!(!scene.can_redo());
    }

    #[test]
    fn test_unserializable_scene_pushes_no_snapshot() {
        let mut scene = SceneState::default();
        let mut bad = fixtures::box_shape("a", Vec3::ZERO);
        bad.transform.rotation.y = f32::NAN;
        scene.shapes.push(bad);
        let revision = scene.history_revision();

        scene.add_shape(fixtures::box_shape("b", Vec3::ZERO));
        assert_eq!(scene.shapes().len(), 2);
        assert!(!scene.can_undo());
        assert_eq!(scene.history_revision(), revision);

        // Once the scene is serializable again history resumes normally
        scene.remove_shape("a");
        scene.add_shape(fixtures::box_shape("c", Vec3::ZERO));
        assert!(scene.can_undo());
        assert!(scene.undo());
        assert_eq!(scene.shapes().len(), 1);
        assert!(!scene.undo());
    }

    #[test]
    fn test_empty_stacks_are_noops() {
        let mut scene = SceneState::default();
        assert!(!scene.undo());
        assert!(!scene.redo());
        assert_eq!(scene.version(), 0);
    }
}
