pub mod mode;
pub mod scene;
pub mod selection;
pub mod settings;
pub mod shape;
pub mod sketch;
pub mod transform;

pub use mode::{InteractionMode, TransformMode};
pub use scene::SceneState;
pub use selection::{SelectionKind, SelectionState, SelectionTarget};
pub use settings::EditorSettings;
pub use shape::{PrimitiveKind, Profile, Shape, ShapeId, ShapeKind, Sketch, Transform};
pub use sketch::{SketchDraft, SketchTool};
