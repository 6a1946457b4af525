//! Shape add / remove / edit operations

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::SceneDocument;
use tracing::{info, warn};

use super::SceneState;
use crate::build::{default_color, default_kind, resting_height};
use crate::codec;
use crate::state::shape::{new_id, PrimitiveKind, Shape, ShapeId, ShapeKind, Transform};

/// Partial dimension edit from the properties display. Fields that do not
/// apply to the shape's kind are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionEdit {
    #[serde(default)]
    pub width: Option<f32>,
    /// Box/cylinder height, or the extrusion height of an extruded shape
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub depth: Option<f32>,
    #[serde(default)]
    pub radius: Option<f32>,
}

/// Keep `old` unless `new` is finite and strictly positive
pub(crate) fn accept_positive(old: f32, new: Option<f32>) -> f32 {
    match new {
        Some(v) if v.is_finite() && v > 0.0 => v,
        Some(v) => {
            warn!(value = v, "Ignoring invalid dimension");
            old
        }
        None => old,
    }
}

impl SceneState {
    /// Create a primitive with default parameters resting on the ground at `at`
    pub fn create_primitive(&mut self, kind: PrimitiveKind, at: Vec3) -> ShapeId {
        let kind = default_kind(kind);
        let position = Vec3::new(at.x, resting_height(&kind), at.z);
        let color = default_color(&kind);
        self.add_shape(Shape::new(new_id(), kind, Transform::at(position), color))
    }

    /// Add a shape to the end of the store
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        self.save_undo();
        let id = shape.id.clone();
        self.shapes.push(shape);
        self.version += 1;
        id
    }

    /// Remove a top-level shape. Missing ids are a no-op.
    pub fn remove_shape(&mut self, id: &str) -> Option<Shape> {
        let index = self.index_of(id)?;
        self.save_undo();
        self.version += 1;
        Some(self.shapes.remove(index))
    }

    /// Remove every shape and sketch
    pub fn clear(&mut self) {
        if self.shapes.is_empty() && self.sketches.is_empty() {
            return;
        }
        self.save_undo();
        self.shapes.clear();
        self.sketches.clear();
        self.version += 1;
    }

    /// Replace the whole scene with a document (import). History is pushed first.
    pub fn import_document(&mut self, doc: &SceneDocument) {
        self.save_undo();
        let decoded = codec::decode(doc);
        info!(
            shapes = decoded.shapes.len(),
            sketches = decoded.sketches.len(),
            "Imported scene"
        );
        self.replace_all(decoded);
    }

    /// Rebuild a shape's mesh with new dimensions, keeping its identity
    pub fn update_dimensions(&mut self, id: &str, edit: DimensionEdit) -> bool {
        let Some(shape) = self.get(id) else {
            return false;
        };
        let new_kind = match shape.kind().clone() {
            ShapeKind::Box {
                width,
                height,
                depth,
            } => ShapeKind::Box {
                width: accept_positive(width, edit.width),
                height: accept_positive(height, edit.height),
                depth: accept_positive(depth, edit.depth),
            },
            ShapeKind::Sphere { radius } => ShapeKind::Sphere {
                radius: accept_positive(radius, edit.radius),
            },
            ShapeKind::Cylinder { radius, height } => ShapeKind::Cylinder {
                radius: accept_positive(radius, edit.radius),
                height: accept_positive(height, edit.height),
            },
            ShapeKind::Extruded { sketch, height } => ShapeKind::Extruded {
                sketch,
                height: accept_positive(height, edit.height),
            },
            ShapeKind::Group { .. } => return false,
        };

        if same_parameters(shape.kind(), &new_kind) {
            return false;
        }

        self.save_undo();
        if let Some(shape) = self.get_mut(id) {
            shape.rebuild(new_kind);
        }
        self.version += 1;
        true
    }

    pub fn set_color(&mut self, id: &str, color: u32) -> bool {
        if color > 0xffffff {
            warn!(color, "Ignoring out-of-range color");
            return false;
        }
        if self.get(id).is_none_or(|s| s.color == color) {
            return false;
        }
        self.save_undo();
        if let Some(shape) = self.get_mut(id) {
            shape.color = color;
        }
        self.version += 1;
        true
    }

    /// Set a transform from the properties display. Non-finite components and
    /// non-positive scale components keep their previous value.
    pub fn set_transform(
        &mut self,
        id: &str,
        position: Option<Vec3>,
        rotation: Option<Vec3>,
        scale: Option<Vec3>,
    ) -> bool {
        let Some(shape) = self.get(id) else {
            return false;
        };
        let old = shape.transform;
        let pick = |old: Vec3, new: Option<Vec3>, positive: bool| -> Vec3 {
            let Some(new) = new else { return old };
            let ok = |v: f32| v.is_finite() && (!positive || v > 0.0);
            Vec3::new(
                if ok(new.x) { new.x } else { old.x },
                if ok(new.y) { new.y } else { old.y },
                if ok(new.z) { new.z } else { old.z },
            )
        };
        let next = Transform {
            position: pick(old.position, position, false),
            rotation: pick(old.rotation, rotation, false),
            scale: pick(old.scale, scale, true),
        };
        if next == old {
            return false;
        }

        self.save_undo();
        if let Some(shape) = self.get_mut(id) {
            shape.transform = next;
        }
        self.version += 1;
        true
    }
}

fn same_parameters(a: &ShapeKind, b: &ShapeKind) -> bool {
    match (a, b) {
        (
            ShapeKind::Box {
                width: w1,
                height: h1,
                depth: d1,
            },
            ShapeKind::Box {
                width: w2,
                height: h2,
                depth: d2,
            },
        ) => w1 == w2 && h1 == h2 && d1 == d2,
        (ShapeKind::Sphere { radius: r1 }, ShapeKind::Sphere { radius: r2 }) => r1 == r2,
        (
            ShapeKind::Cylinder {
                radius: r1,
                height: h1,
            },
            ShapeKind::Cylinder {
                radius: r2,
                height: h2,
            },
        ) => r1 == r2 && h1 == h2,
        (ShapeKind::Extruded { height: h1, .. }, ShapeKind::Extruded { height: h2, .. }) => {
            h1 == h2
        }
        _ => false,
    }
}
