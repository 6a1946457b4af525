//! Mesh building for scene shapes.
//!
//! Every mesh is produced in local space, centered on the origin; placement is
//! carried by the owning shape's transform.

mod extrude_builder;
pub mod mesh_extraction;
mod primitives;

pub use extrude_builder::{extrude_mesh, profile_outline};
pub use primitives::{
    default_color, default_kind, resting_height, DEFAULT_SEGMENTS, MIN_DIMENSION,
};

use crate::state::shape::ShapeKind;
use crate::viewport::mesh::{self, MeshData};

/// Build the local-space mesh for a shape kind. Groups have no mesh of their own.
pub fn build_mesh(kind: &ShapeKind) -> Option<MeshData> {
    match kind {
        ShapeKind::Box {
            width,
            height,
            depth,
        } => Some(mesh::cube(*width, *height, *depth)),
        ShapeKind::Sphere { radius } => Some(mesh::sphere(
            *radius,
            DEFAULT_SEGMENTS / 2,
            DEFAULT_SEGMENTS,
        )),
        ShapeKind::Cylinder { radius, height } => {
            Some(mesh::cylinder(*radius, *height, DEFAULT_SEGMENTS))
        }
        ShapeKind::Extruded { sketch, height } => Some(extrude_mesh(&sketch.profile, *height)),
        ShapeKind::Group { .. } => None,
    }
}
