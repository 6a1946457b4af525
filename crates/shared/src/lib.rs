//! Persisted scene document shared by the editor core and the browser handle.
//!
//! The layout mirrors the JSON the modeler writes on export:
//!
//! ```json
//! { "version": "1.0", "objects": [ ... ], "sketches": [ ... ] }
//! ```
//!
//! Object and sketch records are deliberately flat: every kind-specific field is
//! optional so that a record of an unknown `type` still parses and can be skipped
//! by the reader instead of failing the whole document.

use serde::{Deserialize, Serialize};

/// Unique identifier of a scene entity
pub type ObjectId = String;

/// Current document format version
pub const SCENE_VERSION: &str = "1.0";

fn default_version() -> String {
    SCENE_VERSION.to_string()
}

fn default_scale() -> Vec3Record {
    Vec3Record {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    }
}

/// `{x, y, z}` triple
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3Record {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Vec3Record {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Material of a shape. Color is a packed `0xRRGGBB` integer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialRecord {
    #[serde(default)]
    pub color: u32,
}

/// Box dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionsRecord {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// Profile data carried by an extruded object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchDataRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec3Record>,
}

/// One entry of `objects`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    pub id: ObjectId,
    /// `box`, `sphere`, `cylinder`, `extruded` or `group`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub position: Vec3Record,
    #[serde(default)]
    pub rotation: Vec3Record,
    #[serde(default = "default_scale")]
    pub scale: Vec3Record,
    #[serde(default)]
    pub material: MaterialRecord,
    // box
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<DimensionsRecord>,
    // sphere, cylinder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    // cylinder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    // extruded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extrusion_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sketch_data: Option<SketchDataRecord>,
    // group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ObjectRecord>>,
}

/// One entry of `sketches`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchRecord {
    pub id: ObjectId,
    /// `rectangle` or `circle`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Vec3Record>,
}

/// The whole persisted scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
    #[serde(default)]
    pub sketches: Vec<SketchRecord>,
}

impl Default for SceneDocument {
    fn default() -> Self {
        Self {
            version: default_version(),
            objects: Vec::new(),
            sketches: Vec::new(),
        }
    }
}
