//! Primitive defaults

use crate::state::shape::{PrimitiveKind, ShapeKind};

pub const DEFAULT_SEGMENTS: u32 = 32;

/// Smallest accepted dimension for any primitive parameter
pub const MIN_DIMENSION: f32 = 0.01;

/// Default parameters for a freshly placed primitive
pub fn default_kind(kind: PrimitiveKind) -> ShapeKind {
    match kind {
        PrimitiveKind::Box => ShapeKind::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        },
        PrimitiveKind::Sphere => ShapeKind::Sphere { radius: 0.5 },
        PrimitiveKind::Cylinder => ShapeKind::Cylinder {
            radius: 0.5,
            height: 1.0,
        },
    }
}

/// Default material color per kind, packed 0xRRGGBB
pub fn default_color(kind: &ShapeKind) -> u32 {
    match kind {
        ShapeKind::Box { .. } => 0x4a90d9,
        ShapeKind::Sphere { .. } => 0xe74c3c,
        ShapeKind::Cylinder { .. } => 0x2ecc71,
        ShapeKind::Extruded { .. } => 0x9b59b6,
        ShapeKind::Group { .. } => 0xcccccc,
    }
}

/// Y offset that rests a centered solid on the ground plane
pub fn resting_height(kind: &ShapeKind) -> f32 {
    kind.height() * 0.5
}
