//! Factory functions for creating test data.
//!
//! Provides helpers to construct shapes, sketches and scene documents used in
//! tests and by scripted command batches.

use glam::Vec3;
use shared::{
    DimensionsRecord, MaterialRecord, ObjectRecord, SceneDocument, SketchDataRecord,
    SketchRecord, Vec3Record,
};

use crate::build::{default_color, default_kind};
use crate::state::shape::{PrimitiveKind, Profile, Shape, ShapeKind, Sketch, Transform};

// ── Shape factories ─────────────────────────────────────────────

fn primitive(id: &str, kind: PrimitiveKind, position: Vec3) -> Shape {
    let kind = default_kind(kind);
    let color = default_color(&kind);
    Shape::new(id.to_string(), kind, Transform::at(position), color)
}

/// Unit box at `position`.
pub fn box_shape(id: &str, position: Vec3) -> Shape {
    primitive(id, PrimitiveKind::Box, position)
}

/// Box with explicit dimensions.
pub fn sized_box(id: &str, w: f32, h: f32, d: f32, position: Vec3) -> Shape {
    let kind = ShapeKind::Box {
        width: w,
        height: h,
        depth: d,
    };
    let color = default_color(&kind);
    Shape::new(id.to_string(), kind, Transform::at(position), color)
}

/// Sphere of radius 0.5.
pub fn sphere_shape(id: &str, position: Vec3) -> Shape {
    primitive(id, PrimitiveKind::Sphere, position)
}

/// Cylinder of radius 0.5, height 1.
pub fn cylinder_shape(id: &str, position: Vec3) -> Shape {
    primitive(id, PrimitiveKind::Cylinder, position)
}

/// Extruded solid resting on the ground at the sketch center.
pub fn extruded_shape(id: &str, profile: Profile, center: Vec3, height: f32) -> Shape {
    let kind = ShapeKind::Extruded {
        sketch: Sketch {
            id: format!("{id}-profile"),
            profile,
            center,
        },
        height,
    };
    let color = default_color(&kind);
    let position = Vec3::new(center.x, height * 0.5, center.z);
    Shape::new(id.to_string(), kind, Transform::at(position), color)
}

/// Group at the origin with identity transform.
pub fn group_shape(id: &str, children: Vec<Shape>) -> Shape {
    let kind = ShapeKind::Group { children };
    let color = default_color(&kind);
    Shape::new(id.to_string(), kind, Transform::default(), color)
}

// ── Sketch factories ────────────────────────────────────────────

pub fn rect_sketch(id: &str, width: f32, height: f32, center: Vec3) -> Sketch {
    Sketch {
        id: id.to_string(),
        profile: Profile::Rectangle { width, height },
        center,
    }
}

pub fn circle_sketch(id: &str, radius: f32, center: Vec3) -> Sketch {
    Sketch {
        id: id.to_string(),
        profile: Profile::Circle { radius },
        center,
    }
}

// ── Document factories ──────────────────────────────────────────

/// Box record as it appears in an exported document.
pub fn box_record(id: &str, position: [f64; 3]) -> ObjectRecord {
    ObjectRecord {
        id: id.to_string(),
        kind: "box".to_string(),
        position: Vec3Record::new(position[0], position[1], position[2]),
        rotation: Vec3Record::default(),
        scale: Vec3Record::new(1.0, 1.0, 1.0),
        material: MaterialRecord { color: 0x4a90d9 },
        dimensions: Some(DimensionsRecord {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }),
        radius: None,
        height: None,
        extrusion_height: None,
        sketch_data: None,
        children: None,
    }
}

/// Extruded rectangle record.
pub fn extruded_rect_record(id: &str, width: f64, depth: f64, height: f64) -> ObjectRecord {
    ObjectRecord {
        kind: "extruded".to_string(),
        position: Vec3Record::new(0.0, height * 0.5, 0.0),
        material: MaterialRecord { color: 0x9b59b6 },
        dimensions: None,
        extrusion_height: Some(height),
        sketch_data: Some(SketchDataRecord {
            kind: "rectangle".to_string(),
            width: Some(width),
            height: Some(depth),
            radius: None,
            center: Some(Vec3Record::default()),
        }),
        ..box_record(id, [0.0; 3])
    }
}

pub fn circle_record(id: &str, radius: f64) -> SketchRecord {
    SketchRecord {
        id: id.to_string(),
        kind: "circle".to_string(),
        width: None,
        height: None,
        radius: Some(radius),
        center: Some(Vec3Record::default()),
    }
}

/// Document with the given objects and sketches.
pub fn document(objects: Vec<ObjectRecord>, sketches: Vec<SketchRecord>) -> SceneDocument {
    SceneDocument {
        objects,
        sketches,
        ..Default::default()
    }
}
