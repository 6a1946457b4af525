//! Mesh validation utilities.
//!
//! `MeshValidator` checks the integrity of generated meshes: buffer strides,
//! index ranges, unit normals, winding that agrees with the stored normals,
//! and bounding-box dimensions.

use glam::{Mat4, Vec3};

use crate::viewport::mesh::{MeshData, STRIDE};
use crate::viewport::picking::Aabb;

/// Validator for `MeshData` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len() / STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.indices.len() / 3
    }

    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % STRIDE == 0
    }

    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        self.mesh.indices.iter().all(|&i| i < max_idx)
    }

    fn normal(&self, i: usize) -> Vec3 {
        let base = i * STRIDE + 3;
        Vec3::from_slice(&self.mesh.vertices[base..base + 3])
    }

    /// Check that all vertex normals have unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f32) -> bool {
        (0..self.vertex_count()).all(|i| (self.normal(i).length() - 1.0).abs() <= epsilon)
    }

    /// Triangles whose area is below `min_area`
    pub fn degenerate_triangles(&self, min_area: f32) -> usize {
        self.mesh
            .triangles()
            .filter(|[a, b, c]| (*b - *a).cross(*c - *a).length() * 0.5 < min_area)
            .count()
    }

    /// Triangles whose winding disagrees with their first vertex normal
    pub fn misoriented_triangles(&self) -> usize {
        self.mesh
            .indices
            .chunks_exact(3)
            .zip(self.mesh.triangles())
            .filter(|(idx, [a, b, c])| {
                let face = (*b - *a).cross(*c - *a);
                face.dot(self.normal(idx[0] as usize)) <= 0.0
            })
            .count()
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_mesh(self.mesh, &Mat4::IDENTITY)
    }

    /// Width, height and depth of the bounding box
    pub fn dimensions(&self) -> Vec3 {
        self.aabb().size()
    }

    pub fn dimensions_approx(&self, expected: Vec3, tolerance: f32) -> bool {
        (self.dimensions() - expected).abs().max_element() < tolerance
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "Vertex buffer length {} is not a multiple of {STRIDE}",
                self.mesh.vertices.len()
            ));
            return errors;
        }

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={max_idx}): {out_of_range:?}"
            ));
            return errors;
        }

        if self.vertex_count() > 0 && !self.are_normals_normalized(0.1) {
            errors.push("Some normals are not unit-length (epsilon=0.1)".to_string());
        }

        let flipped = self.misoriented_triangles();
        if flipped > 0 {
            errors.push(format!("{flipped} triangles wind against their normals"));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_mesh;
    use crate::build::{default_kind, extrude_mesh};
    use crate::state::shape::{PrimitiveKind, Profile};

    fn simple_triangle() -> MeshData {
        MeshData {
            vertices: vec![
                0.0, 0.0, 0.0, 0.0, 0.0, 1.0, //
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, //
                0.0, 1.0, 0.0, 0.0, 0.0, 1.0,
            ],
            indices: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_counts() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.vertex_count(), 3);
        assert_eq!(v.triangle_count(), 1);
        assert!(v.validate_all().is_empty());
    }

    #[test]
    fn test_bad_stride() {
        let bad = MeshData {
            vertices: vec![0.0; 10],
            indices: vec![0, 1, 2],
        };
        let errors = MeshValidator::new(&bad).validate_all();
        assert!(errors.iter().any(|e| e.contains("multiple of 6")));
    }

    #[test]
    fn test_bad_indices() {
        let bad = MeshData {
            vertices: vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0],
            indices: vec![0, 5, 2],
        };
        let errors = MeshValidator::new(&bad).validate_all();
        assert!(errors.iter().any(|e| e.contains("out of range")));
    }

    #[test]
    fn test_flipped_winding_is_reported() {
        let mut mesh = simple_triangle();
        mesh.indices = vec![0, 2, 1];
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.misoriented_triangles(), 1);
    }

    #[test]
    fn test_generated_meshes_are_valid() {
        for kind in [PrimitiveKind::Box, PrimitiveKind::Sphere, PrimitiveKind::Cylinder] {
            let mesh = build_mesh(&default_kind(kind)).unwrap();
            let v = MeshValidator::new(&mesh);
            assert!(v.validate_all().is_empty(), "{kind:?}: {:?}", v.validate_all());
            assert_eq!(v.degenerate_triangles(1e-7), 0);
            assert!(v.dimensions_approx(Vec3::ONE, 1e-3));
        }

        let mesh = extrude_mesh(&Profile::Circle { radius: 1.0 }, 2.0);
        let v = MeshValidator::new(&mesh);
        assert!(v.validate_all().is_empty());
        assert!(v.dimensions_approx(Vec3::new(2.0, 2.0, 2.0), 1e-3));
    }
}
