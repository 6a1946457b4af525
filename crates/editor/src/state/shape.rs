//! Scene entities: shapes, sketches and their transforms

use std::cell::OnceCell;

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::build::{self, mesh_extraction::{DerivedGeometry, Edge, Face}};
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Aabb;

/// Unique identifier of a shape or sketch
pub type ShapeId = String;

pub fn new_id() -> ShapeId {
    uuid::Uuid::new_v4().to_string()
}

/// Primitive kinds that can be placed directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    Box,
    Sphere,
    Cylinder,
}

/// Rigid transform. Rotation is Euler XYZ in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z),
            self.position,
        )
    }

    /// Decompose a world matrix back into position / Euler rotation / scale
    pub fn from_matrix(m: &Mat4) -> Self {
        let (scale, rotation, position) = m.to_scale_rotation_translation();
        let (rx, ry, rz) = rotation.to_euler(EulerRot::XYZ);
        Self {
            position,
            rotation: Vec3::new(rx, ry, rz),
            scale,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// 2D profile on the ground plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Profile {
    /// `width` along X, `height` along Z
    Rectangle { width: f32, height: f32 },
    Circle { radius: f32 },
}

impl Profile {
    pub fn type_name(&self) -> &'static str {
        match self {
            Profile::Rectangle { .. } => "rectangle",
            Profile::Circle { .. } => "circle",
        }
    }
}

/// A profile awaiting extrusion
#[derive(Debug, Clone, PartialEq)]
pub struct Sketch {
    pub id: ShapeId,
    pub profile: Profile,
    /// Center on the ground plane (y = 0)
    pub center: Vec3,
}

impl Sketch {
    pub fn new(profile: Profile, center: Vec3) -> Self {
        Self {
            id: new_id(),
            profile,
            center,
        }
    }
}

/// Kind tag plus kind-specific parameters
#[derive(Debug, Clone)]
pub enum ShapeKind {
    Box { width: f32, height: f32, depth: f32 },
    Sphere { radius: f32 },
    Cylinder { radius: f32, height: f32 },
    /// Straight sweep of a sketch; the source sketch is retained for serialization
    Extruded { sketch: Sketch, height: f32 },
    Group { children: Vec<Shape> },
}

impl ShapeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Box { .. } => "box",
            ShapeKind::Sphere { .. } => "sphere",
            ShapeKind::Cylinder { .. } => "cylinder",
            ShapeKind::Extruded { .. } => "extruded",
            ShapeKind::Group { .. } => "group",
        }
    }

    /// Height of the solid along local Y, used to rest it on the ground
    pub fn height(&self) -> f32 {
        match self {
            ShapeKind::Box { height, .. } => *height,
            ShapeKind::Sphere { radius } => radius * 2.0,
            ShapeKind::Cylinder { height, .. } => *height,
            ShapeKind::Extruded { height, .. } => *height,
            ShapeKind::Group { .. } => 0.0,
        }
    }
}

/// A placed solid (or group of solids)
#[derive(Debug, Clone)]
pub struct Shape {
    pub id: ShapeId,
    pub transform: Transform,
    /// Packed 0xRRGGBB
    pub color: u32,
    kind: ShapeKind,
    mesh: Option<MeshData>,
    derived: OnceCell<DerivedGeometry>,
}

impl Shape {
    /// Build a shape and its mesh. Groups carry no mesh of their own.
    pub fn new(id: ShapeId, kind: ShapeKind, transform: Transform, color: u32) -> Self {
        let mesh = build::build_mesh(&kind);
        Self {
            id,
            transform,
            color,
            kind,
            mesh,
            derived: OnceCell::new(),
        }
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ShapeKind::Group { .. })
    }

    pub fn mesh(&self) -> Option<&MeshData> {
        self.mesh.as_ref()
    }

    /// Replace the kind parameters and regenerate the mesh in place.
    /// Identity, transform and color are untouched; derived faces/edges are invalidated.
    pub fn rebuild(&mut self, kind: ShapeKind) {
        self.mesh = build::build_mesh(&kind);
        self.kind = kind;
        self.derived = OnceCell::new();
    }

    fn derived(&self) -> &DerivedGeometry {
        self.derived.get_or_init(|| {
            self.mesh
                .as_ref()
                .map(DerivedGeometry::from_mesh)
                .unwrap_or_default()
        })
    }

    /// Per-triangle faces in local space (empty for groups)
    pub fn faces(&self) -> &[Face] {
        &self.derived().faces
    }

    /// Deduplicated edges in local space (empty for groups)
    pub fn edges(&self) -> &[Edge] {
        &self.derived().edges
    }

    pub fn children(&self) -> &[Shape] {
        match &self.kind {
            ShapeKind::Group { children } => children,
            _ => &[],
        }
    }

    /// Consume a group, yielding its children
    pub fn into_children(self) -> Vec<Shape> {
        match self.kind {
            ShapeKind::Group { children } => children,
            _ => Vec::new(),
        }
    }

    /// Whether `id` names this shape or one of its descendants
    pub fn contains(&self, id: &str) -> bool {
        self.id == id || self.children().iter().any(|c| c.contains(id))
    }

    /// World-space bounds given the parent's world matrix.
    /// Groups aggregate their children's bounds.
    pub fn world_bounds(&self, parent: &Mat4) -> Aabb {
        let world = *parent * self.transform.matrix();
        let mut aabb = match &self.mesh {
            Some(mesh) => Aabb::from_mesh(mesh, &world),
            None => Aabb::empty(),
        };
        for child in self.children() {
            aabb = aabb.union(&child.world_bounds(&world));
        }
        aabb
    }
}
