use serde::{Deserialize, Serialize};

use super::shape::ShapeId;

/// Discriminant of the primary selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionKind {
    Shape,
    Face,
    Edge,
}

/// What the primary selection points at.
///
/// `shape` is always the id of a top-level shape in the store; face and edge
/// indices refer to that shape's derived face/edge lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionTarget {
    Shape(ShapeId),
    Face { shape: ShapeId, index: usize },
    Edge { shape: ShapeId, index: usize },
}

impl SelectionTarget {
    /// Owning top-level shape
    pub fn shape(&self) -> &ShapeId {
        match self {
            SelectionTarget::Shape(id) => id,
            SelectionTarget::Face { shape, .. } | SelectionTarget::Edge { shape, .. } => shape,
        }
    }

    pub fn kind(&self) -> SelectionKind {
        match self {
            SelectionTarget::Shape(_) => SelectionKind::Shape,
            SelectionTarget::Face { .. } => SelectionKind::Face,
            SelectionTarget::Edge { .. } => SelectionKind::Edge,
        }
    }
}

/// Primary selection plus an independent multi-selection of whole shapes
#[derive(Debug, Default)]
pub struct SelectionState {
    primary: Option<SelectionTarget>,
    /// Shapes eligible for grouping, in order of selection
    multi: Vec<ShapeId>,
    /// Bumped on every change
    version: u64,
}

impl SelectionState {
    pub fn primary(&self) -> Option<&SelectionTarget> {
        self.primary.as_ref()
    }

    /// Owning shape of the primary selection
    pub fn owner(&self) -> Option<&ShapeId> {
        self.primary.as_ref().map(SelectionTarget::shape)
    }

    pub fn multi(&self) -> &[ShapeId] {
        &self.multi
    }

    pub fn is_multi_selected(&self, id: &str) -> bool {
        self.multi.iter().any(|s| s == id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Plain selection: replaces the primary and drops any multi-selection
    pub fn select(&mut self, target: SelectionTarget) {
        self.primary = Some(target);
        self.multi.clear();
        self.version += 1;
    }

    /// Toggle a whole shape in the multi-selection.
    ///
    /// When the set is empty, a previous primary on another shape is absorbed
    /// first so that a shift-click sequence accumulates. The primary becomes the
    /// added shape, or the most recent remaining member after a removal.
    pub fn toggle_multi(&mut self, id: ShapeId) {
        if self.multi.is_empty() {
            if let Some(prev) = self.owner() {
                if *prev != id {
                    self.multi.push(prev.clone());
                }
            }
        }

        if let Some(pos) = self.multi.iter().position(|s| *s == id) {
            self.multi.remove(pos);
            self.primary = self.multi.last().cloned().map(SelectionTarget::Shape);
        } else {
            self.multi.push(id.clone());
            self.primary = Some(SelectionTarget::Shape(id));
        }
        self.version += 1;
    }

    pub fn clear(&mut self) {
        if self.primary.is_some() || !self.multi.is_empty() {
            self.primary = None;
            self.multi.clear();
            self.version += 1;
        }
    }

    /// Drop every reference to a shape that left the store
    pub fn forget_shape(&mut self, id: &str) {
        let before = self.multi.len();
        self.multi.retain(|s| s != id);
        let mut changed = before != self.multi.len();
        if self.owner().is_some_and(|owner| owner == id) {
            self.primary = None;
            changed = true;
        }
        if changed {
            self.version += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(id: &str) -> SelectionTarget {
        SelectionTarget::Shape(id.to_string())
    }

    #[test]
    fn test_initial_empty() {
        let s = SelectionState::default();
        assert!(s.primary().is_none());
        assert!(s.multi().is_empty());
    }

    #[test]
    fn test_select_clears_multi() {
        let mut s = SelectionState::default();
        s.toggle_multi("a".into());
        s.toggle_multi("b".into());
        s.select(SelectionTarget::Face {
            shape: "c".into(),
            index: 3,
        });
        assert!(s.multi().is_empty());
        assert_eq!(s.owner().unwrap(), "c");
        assert_eq!(s.primary().unwrap().kind(), SelectionKind::Face);
    }

    #[test]
    fn test_toggle_absorbs_previous_primary() {
        let mut s = SelectionState::default();
        s.select(SelectionTarget::Edge {
            shape: "a".into(),
            index: 0,
        });
        s.toggle_multi("b".into());
        assert_eq!(s.multi(), ["a".to_string(), "b".to_string()]);
        assert_eq!(s.primary(), Some(&shape("b")));
    }

    #[test]
    fn test_toggle_on_primary_owner_does_not_double_add() {
        let mut s = SelectionState::default();
        s.select(shape("a"));
        s.toggle_multi("a".into());
        assert_eq!(s.multi(), ["a".to_string()]);
    }

    #[test]
    fn test_toggle_off_moves_primary_to_last_member() {
        let mut s = SelectionState::default();
        s.toggle_multi("a".into());
        s.toggle_multi("b".into());
        s.toggle_multi("b".into());
        assert_eq!(s.multi(), ["a".to_string()]);
        assert_eq!(s.primary(), Some(&shape("a")));
        s.toggle_multi("a".into());
        assert!(s.primary().is_none());
    }

    #[test]
    fn test_forget_shape() {
        let mut s = SelectionState::default();
        s.toggle_multi("a".into());
        s.toggle_multi("b".into());
        let v = s.version();
        s.forget_shape("b");
        assert_eq!(s.multi(), ["a".to_string()]);
        assert!(s.primary().is_none());
        assert!(s.version() > v);
    }
}
