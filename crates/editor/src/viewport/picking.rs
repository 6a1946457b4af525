use glam::{Mat4, Vec3};

use super::mesh::MeshData;
use crate::state::shape::Shape;

/// A ray in world space
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Express this ray in the local frame of `world`.
    ///
    /// The direction is not renormalized, so a distance `t` along the local ray
    /// names the same point as `t` along the world ray.
    pub fn to_local(&self, world: &Mat4) -> Ray {
        let inv = world.inverse();
        Ray {
            origin: inv.transform_point3(self.origin),
            direction: inv.transform_vector3(self.direction),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Bounds of a mesh after transforming every vertex by `world`
    pub fn from_mesh(data: &MeshData, world: &Mat4) -> Self {
        let mut aabb = Aabb::empty();
        for i in 0..data.vertex_count() {
            aabb.extend(world.transform_point3(data.position(i)));
        }
        aabb
    }

    /// Center of the bounding box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    const EPSILON: f32 = 1e-7;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Result of picking a triangle in a mesh
#[derive(Clone, Debug)]
pub struct TriangleHit {
    /// Index of the triangle (into mesh.indices / 3)
    pub triangle_index: usize,
    /// Distance from ray origin to hit point
    pub distance: f32,
}

/// Find the nearest triangle in a mesh intersected by the ray (both in the same space).
pub fn pick_triangle(ray: &Ray, mesh: &MeshData) -> Option<TriangleHit> {
    let mut best: Option<TriangleHit> = None;

    for (tri_idx, [v0, v1, v2]) in mesh.triangles().enumerate() {
        if let Some(dist) = ray_triangle_intersect(ray, v0, v1, v2) {
            if best.as_ref().is_none_or(|b| dist < b.distance) {
                best = Some(TriangleHit {
                    triangle_index: tri_idx,
                    distance: dist,
                });
            }
        }
    }

    best
}

/// Intersect a ray with the horizontal plane `y = height`
pub fn ray_ground(ray: &Ray, height: f32) -> Option<Vec3> {
    if ray.direction.y.abs() < 1e-6 {
        return None;
    }
    let t = (height - ray.origin.y) / ray.direction.y;
    if t <= 0.0 {
        return None;
    }
    Some(ray.at(t))
}

/// Nearest intersection of a ray with the scene
#[derive(Clone, Debug)]
pub struct SceneHit {
    /// Index of the owning top-level shape in the store
    pub top_index: usize,
    /// Whether the hit triangle belongs to the top-level shape's own mesh
    /// (as opposed to a group child)
    pub on_top_mesh: bool,
    pub triangle_index: usize,
    pub distance: f32,
}

/// Cast a world ray through all top-level shapes, descending into group children
pub fn cast_scene(ray: &Ray, shapes: &[Shape]) -> Option<SceneHit> {
    let mut best: Option<SceneHit> = None;
    for (top_index, shape) in shapes.iter().enumerate() {
        cast_shape(ray, shape, Mat4::IDENTITY, top_index, true, &mut best);
    }
    best
}

fn cast_shape(
    ray: &Ray,
    shape: &Shape,
    parent: Mat4,
    top_index: usize,
    is_top: bool,
    best: &mut Option<SceneHit>,
) {
    let world = parent * shape.transform.matrix();

    if let Some(mesh) = shape.mesh() {
        let local = ray.to_local(&world);
        if let Some(hit) = pick_triangle(&local, mesh) {
            if best.as_ref().is_none_or(|b| hit.distance < b.distance) {
                *best = Some(SceneHit {
                    top_index,
                    on_top_mesh: is_top,
                    triangle_index: hit.triangle_index,
                    distance: hit.distance,
                });
            }
        }
    }

    for child in shape.children() {
        cast_shape(ray, child, world, top_index, false, best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::mesh;

    fn down_ray(x: f32, z: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, 10.0, z),
            direction: Vec3::NEG_Y,
        }
    }

    #[test]
    fn test_ray_triangle_hit_and_miss() {
        let v0 = Vec3::new(-1.0, 0.0, -1.0);
        let v1 = Vec3::new(1.0, 0.0, -1.0);
        let v2 = Vec3::new(0.0, 0.0, 1.0);
        let hit = ray_triangle_intersect(&down_ray(0.0, 0.0), v0, v1, v2);
        assert!((hit.unwrap() - 10.0).abs() < 1e-5);
        assert!(ray_triangle_intersect(&down_ray(5.0, 0.0), v0, v1, v2).is_none());
    }

    #[test]
    fn test_pick_triangle_returns_nearest() {
        let cube = mesh::cube(1.0, 1.0, 1.0);
        let hit = pick_triangle(&down_ray(0.1, 0.2), &cube).unwrap();
        // Top face is hit first, 9.5 units below the origin
        assert!((hit.distance - 9.5).abs() < 1e-5);
        let [a, b, c] = cube.triangle(hit.triangle_index);
        assert!((a.y - 0.5).abs() < 1e-6 && (b.y - 0.5).abs() < 1e-6 && (c.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_ray_ground() {
        let ray = Ray {
            origin: Vec3::new(0.0, 5.0, 0.0),
            direction: Vec3::new(1.0, -1.0, 0.0),
        };
        let p = ray_ground(&ray, 0.0).unwrap();
        assert!((p - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);

        let up = Ray {
            origin: Vec3::new(0.0, 5.0, 0.0),
            direction: Vec3::Y,
        };
        assert!(ray_ground(&up, 0.0).is_none());
    }

    #[test]
    fn test_local_ray_preserves_distance() {
        let world = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::from_rotation_y(0.3),
            Vec3::new(3.0, 0.0, 0.0),
        );
        let ray = down_ray(3.0, 0.0);
        let local = ray.to_local(&world);
        let t = 4.0;
        let world_point = ray.at(t);
        let local_point = local.at(t);
        assert!((world.transform_point3(local_point) - world_point).length() < 1e-4);
    }

    #[test]
    fn test_aabb_from_transformed_mesh() {
        let cube = mesh::cube(2.0, 2.0, 2.0);
        let aabb = Aabb::from_mesh(&cube, &Mat4::from_translation(Vec3::new(1.0, 1.0, 1.0)));
        assert!((aabb.min - Vec3::ZERO).length() < 1e-6);
        assert!((aabb.max - Vec3::splat(2.0)).length() < 1e-6);
        assert!((aabb.center() - Vec3::ONE).length() < 1e-6);
    }
}
