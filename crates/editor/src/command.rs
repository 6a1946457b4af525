//! JSON command protocol.
//!
//! The host UI (and the headless CLI) drives the editor with serde-tagged
//! commands such as `{"command": "extrude", "sketch_index": 0, "height": 1}`.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::Vec3Record;

use crate::controller::Editor;
use crate::state::mode::TransformMode;
use crate::state::scene::{DimensionEdit, SketchEdit};
use crate::state::shape::PrimitiveKind;
use crate::state::sketch::SketchTool;

/// A command the host can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Place a primitive at `at`, or arm placement for the next ground click.
    CreateShape {
        kind: PrimitiveKind,
        #[serde(default)]
        at: Option<Vec3Record>,
    },
    /// Enter a transform mode; repeating the active one (or null) returns to idle.
    SetTransformMode {
        #[serde(default)]
        mode: Option<TransformMode>,
    },
    SetSketchMode {
        enabled: bool,
    },
    SetSketchTool {
        #[serde(default)]
        tool: Option<SketchTool>,
    },
    /// Sweep a committed sketch into a solid.
    Extrude {
        sketch_index: usize,
        height: f32,
    },
    UpdateSketch {
        index: usize,
        #[serde(default)]
        dimensions: SketchEdit,
    },
    /// Change dimensions of the selected shape.
    UpdateShape {
        #[serde(default)]
        dimensions: DimensionEdit,
    },
    SetShapeColor {
        color: u32,
    },
    SetShapeTransform {
        #[serde(default)]
        position: Option<Vec3Record>,
        #[serde(default)]
        rotation: Option<Vec3Record>,
        #[serde(default)]
        scale: Option<Vec3Record>,
    },
    /// Select a top-level shape by id, or clear with null.
    SelectShape {
        #[serde(default)]
        id: Option<String>,
    },
    DeleteSelected,
    /// Clear the entire scene.
    ClearScene,
    GroupSelected,
    UngroupSelected,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Export the scene as JSON.
    ExportScene,
    /// Replace the scene with a JSON document.
    ImportScene {
        scene: String,
    },
    SetSnapToGrid {
        enabled: bool,
    },
    SetGridSize {
        size: f32,
    },
    /// Summary of the scene, modes and history.
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn vec3(r: Vec3Record) -> Vec3 {
    Vec3::new(r.x as f32, r.y as f32, r.z as f32)
}

/// Execute a single command on the editor.
pub fn execute_command(editor: &mut Editor, cmd: EditorCommand) -> CommandResponse {
    match cmd {
        EditorCommand::CreateShape { kind, at } => {
            let id = editor.create_shape(kind, at.map(vec3));
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::SetTransformMode { mode } => {
            editor.set_transform_mode(mode);
            CommandResponse::ok_with_data(serde_json::json!({ "mode": editor.mode().label() }))
        }

        EditorCommand::SetSketchMode { enabled } => {
            editor.set_sketch_mode(enabled);
            CommandResponse::ok_with_data(serde_json::json!({ "mode": editor.mode().label() }))
        }

        EditorCommand::SetSketchTool { tool } => {
            editor.set_sketch_tool(tool);
            CommandResponse::ok_with_data(serde_json::json!({ "mode": editor.mode().label() }))
        }

        EditorCommand::Extrude {
            sketch_index,
            height,
        } => {
            let id = editor.extrude(sketch_index, height);
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::UpdateSketch { index, dimensions } => {
            let updated = editor.update_sketch(index, dimensions);
            CommandResponse::ok_with_data(serde_json::json!({ "updated": updated }))
        }

        EditorCommand::UpdateShape { dimensions } => {
            let updated = editor.update_shape(dimensions);
            CommandResponse::ok_with_data(serde_json::json!({ "updated": updated }))
        }

        EditorCommand::SetShapeColor { color } => {
            let updated = editor.set_shape_color(color);
            CommandResponse::ok_with_data(serde_json::json!({ "updated": updated }))
        }

        EditorCommand::SetShapeTransform {
            position,
            rotation,
            scale,
        } => {
            let updated = editor.set_shape_transform(
                position.map(vec3),
                rotation.map(vec3),
                scale.map(vec3),
            );
            CommandResponse::ok_with_data(serde_json::json!({ "updated": updated }))
        }

        EditorCommand::SelectShape { id } => {
            if editor.select_shape(id.as_deref()) {
                CommandResponse::ok()
            } else {
                CommandResponse::err(format!("No shape with id {}", id.unwrap_or_default()))
            }
        }

        EditorCommand::DeleteSelected => {
            let removed = editor.delete_selected();
            CommandResponse::ok_with_data(serde_json::json!({ "removed": removed }))
        }

        EditorCommand::ClearScene => {
            editor.clear_scene();
            CommandResponse::ok()
        }

        EditorCommand::GroupSelected => {
            let id = editor.group_selected();
            CommandResponse::ok_with_data(serde_json::json!({ "id": id }))
        }

        EditorCommand::UngroupSelected => {
            let children = editor.ungroup_selected();
            CommandResponse::ok_with_data(serde_json::json!({ "children": children }))
        }

        EditorCommand::Undo => {
            let success = editor.undo();
            CommandResponse::ok_with_data(serde_json::json!({ "undone": success }))
        }

        EditorCommand::Redo => {
            let success = editor.redo();
            CommandResponse::ok_with_data(serde_json::json!({ "redone": success }))
        }

        EditorCommand::ExportScene => match editor.export_scene() {
            Ok(json) => CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorCommand::ImportScene { scene } => match editor.import_scene(&scene) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({
                "shape_count": editor.scene().shapes().len(),
                "sketch_count": editor.scene().sketches().len(),
            })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        EditorCommand::SetSnapToGrid { enabled } => {
            editor.set_snap_to_grid(enabled);
            CommandResponse::ok()
        }

        EditorCommand::SetGridSize { size } => {
            if editor.set_grid_size(size) {
                CommandResponse::ok()
            } else {
                CommandResponse::err(format!("Invalid grid size {size}"))
            }
        }

        EditorCommand::Inspect => CommandResponse::ok_with_data(inspect(editor)),
    }
}

fn inspect(editor: &Editor) -> serde_json::Value {
    let scene = editor.scene();
    let shapes: Vec<serde_json::Value> = scene
        .shapes()
        .iter()
        .map(|shape| {
            let p = shape.transform.position;
            serde_json::json!({
                "id": shape.id,
                "kind": shape.type_name(),
                "position": [p.x, p.y, p.z],
                "color": shape.color,
                "face_count": shape.faces().len(),
                "edge_count": shape.edges().len(),
                "children": shape.children().iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();
    let sketches: Vec<serde_json::Value> = scene
        .sketches()
        .iter()
        .map(|s| serde_json::json!({ "id": s.id, "kind": s.profile.type_name() }))
        .collect();
    let selection = editor.selection();

    serde_json::json!({
        "shape_count": shapes.len(),
        "shapes": shapes,
        "sketch_count": sketches.len(),
        "sketches": sketches,
        "mode": editor.mode().label(),
        "selection": {
            "kind": selection.primary().map(|t| t.kind()),
            "shape": selection.owner(),
            "multi": selection.multi(),
        },
        "can_undo": scene.can_undo(),
        "can_redo": scene.can_redo(),
        "snap": editor.settings().snap,
    })
}

/// Parse and execute a single JSON command string.
pub fn execute_json(editor: &mut Editor, json: &str) -> Result<CommandResponse, String> {
    let cmd: EditorCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(editor, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    editor: &mut Editor,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<EditorCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(editor, cmd))
        .collect())
}
