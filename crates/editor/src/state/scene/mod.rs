//! Scene state management
//!
//! Holds the ordered top-level shapes, the sketch list and a snapshot-based
//! undo/redo history. Every mutating operation snapshots the whole scene
//! before applying its change.

mod group_ops;
mod history;
mod persistence;
mod shape_ops;
mod sketch_ops;
mod transform_ops;

pub use shape_ops::DimensionEdit;
pub use sketch_ops::SketchEdit;

use shared::SceneDocument;
use tracing::error;

use super::shape::{Shape, Sketch};
use crate::codec::{self, DecodedScene};

const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Shapes, sketches and undo/redo history
#[derive(Debug)]
pub struct SceneState {
    /// Top-level shapes (a group counts as one entry)
    pub(crate) shapes: Vec<Shape>,
    /// Committed sketches awaiting extrusion
    pub(crate) sketches: Vec<Sketch>,
    /// Undo stack - serialized previous states
    pub(crate) undo_stack: Vec<String>,
    /// Redo stack - serialized undone states
    pub(crate) redo_stack: Vec<String>,
    /// Monotonically increasing version counter
    pub(crate) version: u64,
    /// Bumped whenever either history stack changes
    pub(crate) history_revision: u64,
    max_history: usize,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_DEPTH)
    }
}

impl SceneState {
    pub fn with_history_limit(max_history: usize) -> Self {
        Self {
            shapes: Vec::new(),
            sketches: Vec::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            version: 0,
            history_revision: 0,
            max_history: max_history.max(1),
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn sketches(&self) -> &[Sketch] {
        &self.sketches
    }

    /// Top-level shape by id
    pub fn get(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.shapes.iter().position(|s| s.id == id)
    }

    /// Top-level shape containing `id` (itself or as a group descendant)
    pub fn owner_of(&self, id: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.contains(id))
    }

    /// Serialize the live scene
    pub fn document(&self) -> SceneDocument {
        codec::encode(&self.shapes, &self.sketches)
    }

    pub fn history_revision(&self) -> u64 {
        self.history_revision
    }

    /// Snapshot the current scene onto the undo stack and clear redo.
    /// A snapshot that cannot be serialized is logged and not pushed.
    pub(crate) fn save_undo(&mut self) -> bool {
        match self.snapshot() {
            Ok(snapshot) => {
                self.undo_stack.push(snapshot);
                if self.undo_stack.len() > self.max_history {
                    self.undo_stack.remove(0);
                }
                self.redo_stack.clear();
                self.history_revision += 1;
                true
            }
            Err(e) => {
                error!("Skipping undo snapshot: {e}");
                false
            }
        }
    }

    pub(crate) fn snapshot(&self) -> Result<String, codec::CodecError> {
        codec::to_json(&self.document())
    }

    /// Replace every shape and sketch without touching history
    pub(crate) fn replace_all(&mut self, decoded: DecodedScene) {
        self.shapes = decoded.shapes;
        self.sketches = decoded.sketches;
        self.version += 1;
    }
}
