//! Scene document codec.
//!
//! Converts live shapes and sketches to the persisted [`SceneDocument`] and back.
//! Decoding is lenient per record: entries of an unknown type or with unusable
//! parameters are skipped with a warning, never failing the whole document.
//! Only a document that cannot be parsed at all is an error.

use glam::Vec3;
use shared::{
    DimensionsRecord, MaterialRecord, ObjectRecord, SceneDocument, SketchDataRecord,
    SketchRecord, Vec3Record, SCENE_VERSION,
};
use thiserror::Error;
use tracing::warn;

use crate::build::default_color;
use crate::state::shape::{Profile, Shape, ShapeKind, Sketch, Transform};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to parse scene document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to serialize scene document: {0}")]
    Serialize(serde_json::Error),
    #[error("scene file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("record {0} holds a non-finite number")]
    NonFinite(String),
}

/// Live entities decoded from a document
#[derive(Debug, Default)]
pub struct DecodedScene {
    pub shapes: Vec<Shape>,
    pub sketches: Vec<Sketch>,
}

// ── Encoding ─────────────────────────────────────────────────

pub fn encode(shapes: &[Shape], sketches: &[Sketch]) -> SceneDocument {
    SceneDocument {
        version: SCENE_VERSION.to_string(),
        objects: shapes.iter().map(encode_shape).collect(),
        sketches: sketches.iter().map(encode_sketch).collect(),
    }
}

fn vec3_record(v: Vec3) -> Vec3Record {
    Vec3Record::new(v.x as f64, v.y as f64, v.z as f64)
}

fn encode_shape(shape: &Shape) -> ObjectRecord {
    let mut record = ObjectRecord {
        id: shape.id.clone(),
        kind: shape.type_name().to_string(),
        position: vec3_record(shape.transform.position),
        rotation: vec3_record(shape.transform.rotation),
        scale: vec3_record(shape.transform.scale),
        material: MaterialRecord { color: shape.color },
        dimensions: None,
        radius: None,
        height: None,
        extrusion_height: None,
        sketch_data: None,
        children: None,
    };

    match shape.kind() {
        ShapeKind::Box {
            width,
            height,
            depth,
        } => {
            record.dimensions = Some(DimensionsRecord {
                width: *width as f64,
                height: *height as f64,
                depth: *depth as f64,
            });
        }
        ShapeKind::Sphere { radius } => record.radius = Some(*radius as f64),
        ShapeKind::Cylinder { radius, height } => {
            record.radius = Some(*radius as f64);
            record.height = Some(*height as f64);
        }
        ShapeKind::Extruded { sketch, height } => {
            record.extrusion_height = Some(*height as f64);
            record.sketch_data = Some(encode_sketch_data(sketch));
        }
        ShapeKind::Group { children } => {
            record.children = Some(children.iter().map(encode_shape).collect());
        }
    }

    record
}

fn encode_sketch_data(sketch: &Sketch) -> SketchDataRecord {
    let mut data = SketchDataRecord {
        kind: sketch.profile.type_name().to_string(),
        width: None,
        height: None,
        radius: None,
        center: Some(vec3_record(sketch.center)),
    };
    match sketch.profile {
        Profile::Rectangle { width, height } => {
            data.width = Some(width as f64);
            data.height = Some(height as f64);
        }
        Profile::Circle { radius } => data.radius = Some(radius as f64),
    }
    data
}

pub fn encode_sketch(sketch: &Sketch) -> SketchRecord {
    let data = encode_sketch_data(sketch);
    SketchRecord {
        id: sketch.id.clone(),
        kind: data.kind,
        width: data.width,
        height: data.height,
        radius: data.radius,
        center: data.center,
    }
}

// ── Decoding ─────────────────────────────────────────────────

pub fn decode(doc: &SceneDocument) -> DecodedScene {
    if doc.version != SCENE_VERSION {
        warn!(version = %doc.version, "Unexpected scene document version, reading anyway");
    }

    DecodedScene {
        shapes: doc.objects.iter().filter_map(decode_shape).collect(),
        sketches: doc
            .sketches
            .iter()
            .filter_map(|r| {
                let sketch = decode_profile(&r.kind, r.width, r.height, r.radius, r.center)
                    .map(|(profile, center)| Sketch {
                        id: r.id.clone(),
                        profile,
                        center,
                    });
                if sketch.is_none() {
                    warn!(id = %r.id, kind = %r.kind, "Skipping unreadable sketch record");
                }
                sketch
            })
            .collect(),
    }
}

/// Finite and strictly positive
fn positive(v: Option<f64>) -> Option<f32> {
    let v = v? as f32;
    (v.is_finite() && v > 0.0).then_some(v)
}

fn vec3(r: Vec3Record) -> Vec3 {
    Vec3::new(r.x as f32, r.y as f32, r.z as f32)
}

fn decode_profile(
    kind: &str,
    width: Option<f64>,
    height: Option<f64>,
    radius: Option<f64>,
    center: Option<Vec3Record>,
) -> Option<(Profile, Vec3)> {
    let profile = match kind {
        "rectangle" => Profile::Rectangle {
            width: positive(width)?,
            height: positive(height)?,
        },
        "circle" => Profile::Circle {
            radius: positive(radius)?,
        },
        _ => return None,
    };
    let center = center.map(vec3).unwrap_or(Vec3::ZERO);
    center.is_finite().then_some((profile, center))
}

fn decode_shape(r: &ObjectRecord) -> Option<Shape> {
    let kind = match r.kind.as_str() {
        "box" => r.dimensions.and_then(|d| {
            Some(ShapeKind::Box {
                width: positive(Some(d.width))?,
                height: positive(Some(d.height))?,
                depth: positive(Some(d.depth))?,
            })
        }),
        "sphere" => positive(r.radius).map(|radius| ShapeKind::Sphere { radius }),
        "cylinder" => positive(r.radius)
            .zip(positive(r.height))
            .map(|(radius, height)| ShapeKind::Cylinder { radius, height }),
        "extruded" => r.sketch_data.as_ref().and_then(|d| {
            let (profile, center) = decode_profile(&d.kind, d.width, d.height, d.radius, d.center)?;
            Some(ShapeKind::Extruded {
                sketch: Sketch {
                    id: format!("{}-profile", r.id),
                    profile,
                    center,
                },
                height: positive(r.extrusion_height)?,
            })
        }),
        "group" => Some(ShapeKind::Group {
            children: r
                .children
                .iter()
                .flatten()
                .filter_map(decode_shape)
                .collect(),
        }),
        _ => None,
    };

    let Some(kind) = kind else {
        warn!(id = %r.id, kind = %r.kind, "Skipping unreadable object record");
        return None;
    };

    let transform = Transform {
        position: vec3(r.position),
        rotation: vec3(r.rotation),
        scale: vec3(r.scale),
    };
    if !transform.is_finite() {
        warn!(id = %r.id, "Skipping object with non-finite transform");
        return None;
    }

    let color = if r.material.color > 0xffffff {
        default_color(&kind)
    } else {
        r.material.color
    };

    Some(Shape::new(r.id.clone(), kind, transform, color))
}

// ── JSON ─────────────────────────────────────────────────────

/// Serialize a document. JSON has no NaN or infinity, so a record holding one
/// is refused instead of being written as `null`.
pub fn to_json(doc: &SceneDocument) -> Result<String, CodecError> {
    for object in &doc.objects {
        check_object(object)?;
    }
    for sketch in &doc.sketches {
        let values = [sketch.width, sketch.height, sketch.radius];
        if !all_finite(values.into_iter().flatten(), sketch.center.as_ref()) {
            return Err(CodecError::NonFinite(sketch.id.clone()));
        }
    }
    serde_json::to_string_pretty(doc).map_err(CodecError::Serialize)
}

fn vec3_finite(v: &Vec3Record) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

fn all_finite(values: impl IntoIterator<Item = f64>, point: Option<&Vec3Record>) -> bool {
    values.into_iter().all(f64::is_finite) && point.is_none_or(vec3_finite)
}

fn check_object(r: &ObjectRecord) -> Result<(), CodecError> {
    let mut values = vec![r.radius, r.height, r.extrusion_height];
    if let Some(d) = r.dimensions {
        values.extend([Some(d.width), Some(d.height), Some(d.depth)]);
    }
    let mut center = None;
    if let Some(data) = &r.sketch_data {
        values.extend([data.width, data.height, data.radius]);
        center = data.center.as_ref();
    }
    let ok = [&r.position, &r.rotation, &r.scale].into_iter().all(vec3_finite)
        && all_finite(values.into_iter().flatten(), center);
    if !ok {
        return Err(CodecError::NonFinite(r.id.clone()));
    }
    r.children.iter().flatten().try_for_each(check_object)
}

pub fn from_json(json: &str) -> Result<SceneDocument, CodecError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_non_finite_values_are_not_serialized() {
        let mut doc = fixtures::document(vec![fixtures::box_record("b", [0.0, 0.5, 0.0])], vec![]);
        assert!(to_json(&doc).is_ok());

        doc.objects[0].rotation.y = f64::NAN;
        assert!(matches!(to_json(&doc), Err(CodecError::NonFinite(id)) if id == "b"));

        let mut nested = fixtures::box_record("child", [0.0; 3]);
        nested.dimensions = nested.dimensions.map(|mut d| {
            d.width = f64::INFINITY;
            d
        });
        let mut group = fixtures::box_record("g", [0.0; 3]);
        group.kind = "group".into();
        group.dimensions = None;
        group.children = Some(vec![nested]);
        let doc = fixtures::document(vec![group], vec![]);
        assert!(matches!(to_json(&doc), Err(CodecError::NonFinite(id)) if id == "child"));

        let mut sketch = fixtures::circle_record("s", 1.0);
        sketch.radius = Some(f64::NAN);
        assert!(to_json(&fixtures::document(vec![], vec![sketch])).is_err());
    }

    fn round_trip(shapes: &[Shape], sketches: &[Sketch]) -> DecodedScene {
        let json = to_json(&encode(shapes, sketches)).unwrap();
        decode(&from_json(&json).unwrap())
    }

    fn assert_same_shape(a: &Shape, b: &Shape) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.type_name(), b.type_name());
        assert_eq!(a.color, b.color);
        assert!((a.transform.position - b.transform.position).length() < 1e-6);
        assert!((a.transform.rotation - b.transform.rotation).length() < 1e-6);
        assert!((a.transform.scale - b.transform.scale).length() < 1e-6);
        assert_eq!(a.children().len(), b.children().len());
    }

    #[test]
    fn test_every_kind_round_trips() {
        let mut boxed = fixtures::box_shape("b", Vec3::new(1.0, 0.5, -2.0));
        boxed.transform.rotation = Vec3::new(0.0, 0.8, 0.0);
        boxed.transform.scale = Vec3::new(2.0, 1.0, 0.5);
        boxed.color = 0x123456;
        let shapes = vec![
            boxed,
            fixtures::sphere_shape("s", Vec3::new(0.0, 0.5, 0.0)),
            fixtures::cylinder_shape("c", Vec3::new(3.0, 0.5, 0.0)),
            fixtures::extruded_shape(
                "e",
                Profile::Rectangle {
                    width: 2.0,
                    height: 3.0,
                },
                Vec3::new(1.0, 0.0, 1.5),
                1.0,
            ),
            fixtures::extruded_shape(
                "e2",
                Profile::Circle { radius: 0.75 },
                Vec3::new(-1.0, 0.0, 0.0),
                2.0,
            ),
        ];
        let sketches = vec![
            fixtures::rect_sketch("r", 1.0, 2.0, Vec3::new(0.5, 0.0, 1.0)),
            fixtures::circle_sketch("k", 0.4, Vec3::new(-2.0, 0.0, 0.0)),
        ];

        let decoded = round_trip(&shapes, &sketches);

        assert_eq!(decoded.shapes.len(), shapes.len());
        for (a, b) in shapes.iter().zip(&decoded.shapes) {
            assert_same_shape(a, b);
        }
        match (shapes[3].kind(), decoded.shapes[3].kind()) {
            (
                ShapeKind::Extruded { sketch: a, height: ha },
                ShapeKind::Extruded { sketch: b, height: hb },
            ) => {
                assert_eq!(a.profile, b.profile);
                assert_eq!(a.center, b.center);
                assert_eq!(ha, hb);
            }
            _ => panic!("extruded shape lost its kind"),
        }
        assert_eq!(decoded.sketches, sketches);
    }

    #[test]
    fn test_group_round_trips_with_children() {
        let group = fixtures::group_shape(
            "g",
            vec![
                fixtures::box_shape("a", Vec3::new(-1.0, 0.5, 0.0)),
                fixtures::sphere_shape("b", Vec3::new(1.0, 0.5, 0.0)),
            ],
        );
        let decoded = round_trip(&[group.clone()], &[]);
        assert_same_shape(&group, &decoded.shapes[0]);
        assert_eq!(decoded.shapes[0].children()[1].id, "b");
    }

    #[test]
    fn test_unknown_and_invalid_records_are_skipped() {
        let json = r#"{
            "version": "1.0",
            "objects": [
                {"id": "t", "type": "torus"},
                {"id": "s", "type": "sphere", "radius": -1},
                {"id": "b", "type": "box", "dimensions": {"width": 1, "height": 1, "depth": 1}}
            ],
            "sketches": [
                {"id": "p", "type": "polygon"},
                {"id": "c", "type": "circle", "radius": 1}
            ]
        }"#;
        let decoded = decode(&from_json(json).unwrap());
        assert_eq!(decoded.shapes.len(), 1);
        assert_eq!(decoded.shapes[0].id, "b");
        assert_eq!(decoded.sketches.len(), 1);
        assert_eq!(decoded.sketches[0].id, "c");
    }

    #[test]
    fn test_unparseable_document_is_an_error() {
        assert!(matches!(from_json("{ not json"), Err(CodecError::Parse(_))));
    }
}
