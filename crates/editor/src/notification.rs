//! Notifications published to the host UI.
//!
//! The editor queues these as state changes happen; the host drains the queue
//! after each event and updates its panels.

use serde::Serialize;
use shared::SketchRecord;

use crate::state::selection::{SelectionKind, SelectionTarget};
use crate::state::shape::ShapeId;

/// Selected entity as seen by the UI
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRef {
    /// Owning top-level shape
    pub shape: ShapeId,
    /// Face or edge index, absent for whole-shape selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

impl From<&SelectionTarget> for EntityRef {
    fn from(target: &SelectionTarget) -> Self {
        let index = match target {
            SelectionTarget::Shape(_) => None,
            SelectionTarget::Face { index, .. } | SelectionTarget::Edge { index, .. } => {
                Some(*index)
            }
        };
        Self {
            shape: target.shape().clone(),
            index,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    SelectionChanged {
        entity: Option<EntityRef>,
        kind: Option<SelectionKind>,
    },
    SketchesChanged {
        list: Vec<SketchRecord>,
    },
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
    },
}

impl Notification {
    pub fn selection(target: Option<&SelectionTarget>) -> Self {
        Notification::SelectionChanged {
            entity: target.map(EntityRef::from),
            kind: target.map(SelectionTarget::kind),
        }
    }
}
