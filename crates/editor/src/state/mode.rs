use serde::{Deserialize, Serialize};

use super::shape::PrimitiveKind;
use super::sketch::SketchTool;

/// Active transform tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformMode {
    Translate,
    Rotate,
    Scale,
}

/// Top-level interaction mode. Exactly one is active; pointer events are
/// interpreted according to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    /// Next ground click places a primitive
    Placing(PrimitiveKind),
    /// Sketch mode, optionally with a drawing tool
    Sketching(Option<SketchTool>),
    Transforming(TransformMode),
}

impl InteractionMode {
    pub fn transform_mode(&self) -> Option<TransformMode> {
        match self {
            InteractionMode::Transforming(m) => Some(*m),
            _ => None,
        }
    }

    pub fn sketch_tool(&self) -> Option<SketchTool> {
        match self {
            InteractionMode::Sketching(tool) => *tool,
            _ => None,
        }
    }

    pub fn is_sketching(&self) -> bool {
        matches!(self, InteractionMode::Sketching(_))
    }

    /// Short label for inspection output
    pub fn label(&self) -> String {
        match self {
            InteractionMode::Idle => "idle".into(),
            InteractionMode::Placing(kind) => format!("placing:{kind:?}").to_lowercase(),
            InteractionMode::Sketching(None) => "sketching".into(),
            InteractionMode::Sketching(Some(tool)) => format!("sketching:{tool:?}").to_lowercase(),
            InteractionMode::Transforming(m) => format!("transforming:{m:?}").to_lowercase(),
        }
    }
}
