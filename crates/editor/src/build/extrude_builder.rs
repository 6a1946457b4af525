//! Straight extrusion of sketch profiles

use super::primitives::DEFAULT_SEGMENTS;
use crate::state::shape::Profile;
use crate::viewport::mesh::{self, MeshData};

/// Closed XZ outline of a profile, centered on the origin and ordered by
/// increasing angle from +X towards +Z
pub fn profile_outline(profile: &Profile) -> Vec<[f32; 2]> {
    match *profile {
        Profile::Rectangle { width, height } => {
            let hw = width * 0.5;
            let hd = height * 0.5;
            vec![[hw, -hd], [hw, hd], [-hw, hd], [-hw, -hd]]
        }
        Profile::Circle { radius } => mesh::circle_outline(radius, DEFAULT_SEGMENTS),
    }
}

/// Sweep a profile along +Y. The mesh spans `-height/2..height/2`; the shape's
/// transform places it at the sketch center.
pub fn extrude_mesh(profile: &Profile, height: f32) -> MeshData {
    mesh::prism(&profile_outline(profile), height)
}
