//! Screen-space edge picking
//!
//! Projects mesh edges through the camera and measures pixel distance from the
//! pointer, so edge selection tolerance stays constant regardless of zoom.

use glam::{Mat4, Vec2};

use super::camera::ArcBallCamera;
use crate::build::mesh_extraction::Edge;

/// Result of edge picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeHit {
    pub edge_index: usize,
    /// Pixel distance from the pointer to the projected segment
    pub distance: f32,
}

/// Calculate distance from a 2D point to a 2D line segment (clamped to the segment)
pub fn point_to_segment_2d(point: Vec2, p0: Vec2, p1: Vec2) -> f32 {
    let d = p1 - p0;
    let len_sq = d.length_squared();

    if len_sq < 1e-8 {
        return point.distance(p0);
    }

    let t = ((point - p0).dot(d) / len_sq).clamp(0.0, 1.0);
    point.distance(p0 + d * t)
}

/// Pick the edge whose screen projection is closest to `cursor`.
///
/// Returns the closest edge only if it lies within `pixel_tolerance`. Edges with
/// an endpoint behind the camera are ignored.
pub fn pick_edge_2d(
    cursor: Vec2,
    edges: &[Edge],
    world: &Mat4,
    camera: &ArcBallCamera,
    viewport: Vec2,
    pixel_tolerance: f32,
) -> Option<EdgeHit> {
    let mut best: Option<EdgeHit> = None;

    for (idx, edge) in edges.iter().enumerate() {
        let Some(p0) = camera.project(world.transform_point3(edge.start), viewport) else { continue };
        let Some(p1) = camera.project(world.transform_point3(edge.end), viewport) else { continue };

        let distance = point_to_segment_2d(cursor, p0, p1);
        if best.as_ref().is_none_or(|b| distance < b.distance) {
            best = Some(EdgeHit {
                edge_index: idx,
                distance,
            });
        }
    }

    best.filter(|hit| hit.distance <= pixel_tolerance)
}
