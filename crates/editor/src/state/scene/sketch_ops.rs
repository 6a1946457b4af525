//! Sketch list operations and extrusion

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::shape_ops::accept_positive;
use super::SceneState;
use crate::build::default_color;
use crate::state::shape::{new_id, Profile, Shape, ShapeId, ShapeKind, Sketch, Transform};

/// Partial edit of a committed sketch's profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SketchEdit {
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub radius: Option<f32>,
}

impl SceneState {
    /// Commit a finished sketch to the list
    pub fn commit_sketch(&mut self, sketch: Sketch) {
        self.save_undo();
        self.sketches.push(sketch);
        self.version += 1;
    }

    /// Edit a committed sketch. Out-of-range index or invalid values are ignored.
    pub fn update_sketch(&mut self, index: usize, edit: SketchEdit) -> bool {
        let Some(sketch) = self.sketches.get(index) else {
            return false;
        };
        let profile = match sketch.profile {
            Profile::Rectangle { width, height } => Profile::Rectangle {
                width: accept_positive(width, edit.width),
                height: accept_positive(height, edit.height),
            },
            Profile::Circle { radius } => Profile::Circle {
                radius: accept_positive(radius, edit.radius),
            },
        };
        if profile == sketch.profile {
            return false;
        }

        self.save_undo();
        if let Some(sketch) = self.sketches.get_mut(index) {
            sketch.profile = profile;
        }
        self.version += 1;
        true
    }

    /// Sweep a committed sketch into a solid, consuming the sketch.
    /// Returns the new shape id; a missing index or invalid height is a no-op.
    pub fn extrude_sketch(&mut self, index: usize, height: f32) -> Option<ShapeId> {
        if index >= self.sketches.len() {
            return None;
        }
        if !(height.is_finite() && height > 0.0) {
            warn!(height, "Ignoring extrusion with invalid height");
            return None;
        }

        self.save_undo();
        let sketch = self.sketches.remove(index);
        let position = Vec3::new(sketch.center.x, height * 0.5, sketch.center.z);
        let kind = ShapeKind::Extruded { sketch, height };
        let color = default_color(&kind);
        let shape = Shape::new(new_id(), kind, Transform::at(position), color);
        let id = shape.id.clone();
        self.shapes.push(shape);
        self.version += 1;

        info!(%id, height, "Extruded sketch");
        Some(id)
    }
}
