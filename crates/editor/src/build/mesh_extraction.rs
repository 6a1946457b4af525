//! Face and edge extraction from triangle meshes

use std::collections::HashSet;

use glam::Vec3;

use crate::viewport::mesh::MeshData;

/// Triangle-level face record, local space
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub centroid: Vec3,
    /// Unit normal (zero for a degenerate triangle)
    pub normal: Vec3,
    pub vertices: [Vec3; 3],
    pub area: f32,
    /// Longest side of the triangle
    pub size: f32,
}

/// Undirected segment between two local-space points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Vec3,
    pub end: Vec3,
}

impl Edge {
    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }

    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }
}

/// Faces and edges derived from one mesh
#[derive(Debug, Clone, Default)]
pub struct DerivedGeometry {
    pub faces: Vec<Face>,
    pub edges: Vec<Edge>,
}

impl DerivedGeometry {
    pub fn from_mesh(mesh: &MeshData) -> Self {
        Self {
            faces: extract_faces(mesh),
            edges: extract_edges(mesh),
        }
    }
}

/// One face per triangle, in triangle order, so a triangle index is a face index
pub fn extract_faces(mesh: &MeshData) -> Vec<Face> {
    mesh.triangles()
        .map(|[v0, v1, v2]| {
            let cross = (v1 - v0).cross(v2 - v0);
            let size = (v1 - v0)
                .length()
                .max((v2 - v1).length())
                .max((v0 - v2).length());
            Face {
                centroid: (v0 + v1 + v2) / 3.0,
                normal: cross.normalize_or_zero(),
                vertices: [v0, v1, v2],
                area: cross.length() * 0.5,
                size,
            }
        })
        .collect()
}

type QuantizedPos = (i64, i64, i64);

/// Round to 3 decimal places
fn quantize_position(pos: Vec3) -> QuantizedPos {
    let scale = 1000.0;
    (
        (pos.x * scale).round() as i64,
        (pos.y * scale).round() as i64,
        (pos.z * scale).round() as i64,
    )
}

fn edge_key(p1: QuantizedPos, p2: QuantizedPos) -> (QuantizedPos, QuantizedPos) {
    if p1 < p2 { (p1, p2) } else { (p2, p1) }
}

/// Extract all triangle edges, merging edges whose endpoints coincide at 3 decimals
/// in either order. Order follows first appearance in the index buffer.
pub fn extract_edges(mesh: &MeshData) -> Vec<Edge> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for [v0, v1, v2] in mesh.triangles() {
        for (a, b) in [(v0, v1), (v1, v2), (v2, v0)] {
            let qa = quantize_position(a);
            let qb = quantize_position(b);
            if qa == qb {
                continue;
            }
            if seen.insert(edge_key(qa, qb)) {
                edges.push(Edge { start: a, end: b });
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh;

    #[test]
    fn test_quantize_position() {
        let p1 = Vec3::new(1.0, 2.0, 3.0);
        let p2 = Vec3::new(1.0001, 2.0, 3.0);
        assert_eq!(quantize_position(p1), quantize_position(p2));
    }

    #[test]
    fn test_cube_faces_match_triangles() {
        let m = mesh::cube(1.0, 1.0, 1.0);
        let faces = extract_faces(&m);
        assert_eq!(faces.len(), 12);
        // First two triangles are the +Z face
        assert!((faces[0].normal - Vec3::Z).length() < 1e-6);
        assert!((faces[0].area - 0.5).abs() < 1e-6);
        assert!((faces[0].size - 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_cube_edges_are_deduplicated() {
        // 12 box edges plus one diagonal per side
        let edges = extract_edges(&mesh::cube(1.0, 1.0, 1.0));
        assert_eq!(edges.len(), 18);
    }

    #[test]
    fn test_shared_edge_in_reverse_order_counts_once() {
        let mut m = MeshData::default();
        let pts = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ];
        for p in pts {
            m.vertices.extend_from_slice(&[p.x, p.y, p.z, 0.0, 0.0, 1.0]);
        }
        m.indices = vec![0, 1, 2, 2, 1, 3];
        assert_eq!(extract_edges(&m).len(), 5);
    }
}
