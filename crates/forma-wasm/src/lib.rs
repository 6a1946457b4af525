//! Browser binding for the forma editor.
//!
//! The page owns the canvas and the WebGL renderer; it forwards pointer and
//! keyboard input to [`EditorHandle`], polls [`EditorHandle::frame`] for what to
//! draw, and drains notifications after each input to refresh its panels.

use glam::{Vec2, Vec3};
#[cfg(test)]
use glam::Mat4;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

use forma_editor::build::profile_outline;
use forma_editor::command::execute_json;
use forma_editor::controller::{Highlight, RenderItem};
use forma_editor::state::EditorSettings;
use forma_editor::viewport::picking::Aabb;
use forma_editor::{Editor, Modifiers};

fn report(msg: &str) -> JsError {
    web_sys::console::error_1(&JsValue::from_str(msg));
    JsError::new(msg)
}

fn vec3(v: Vec3) -> [f32; 3] {
    v.to_array()
}

fn aabb_json(b: &Aabb) -> Value {
    json!({ "min": vec3(b.min), "max": vec3(b.max) })
}

fn highlight_json(h: &Highlight) -> Value {
    match h {
        Highlight::Bounds(b) => json!({ "type": "bounds", "bounds": aabb_json(b) }),
        Highlight::Triangle(t) => {
            json!({ "type": "triangle", "points": t.map(vec3) })
        }
        Highlight::Segment(s) => json!({ "type": "segment", "points": s.map(vec3) }),
    }
}

fn item_json(item: &RenderItem<'_>) -> Value {
    json!({
        "id": item.id,
        "owner": item.owner,
        "color": item.color,
        "world": item.world.to_cols_array(),
    })
}

#[wasm_bindgen]
pub struct EditorHandle {
    editor: Editor,
}

#[wasm_bindgen]
impl EditorHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> EditorHandle {
        let mut editor = Editor::new(EditorSettings::default());
        editor.set_viewport(width, height);
        EditorHandle { editor }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.editor.set_viewport(width, height);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, ctrl: bool, shift: bool) {
        self.editor
            .pointer_down(Vec2::new(x, y), Modifiers { ctrl, shift });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.editor.pointer_move(Vec2::new(x, y));
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.editor.pointer_up(Vec2::new(x, y));
    }

    /// Returns whether the key was consumed
    pub fn key(&mut self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.editor.key(key, ctrl, shift)
    }

    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.editor.orbit(dx, dy);
    }

    pub fn zoom(&mut self, delta: f32) {
        self.editor.zoom(delta);
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.editor.pan(dx, dy);
    }

    /// Execute one JSON command and return the JSON response
    pub fn dispatch(&mut self, command: &str) -> Result<String, JsError> {
        let response = execute_json(&mut self.editor, command).map_err(|e| report(&e))?;
        serde_json::to_string(&response).map_err(|e| report(&e.to_string()))
    }

    pub fn export_scene(&self) -> Result<String, JsError> {
        self.editor
            .export_scene()
            .map_err(|e| report(&format!("Export failed: {e}")))
    }

    pub fn import_scene(&mut self, json: &str) -> Result<(), JsError> {
        self.editor
            .import_scene(json)
            .map_err(|e| report(&format!("Import failed: {e}")))
    }

    /// JSON array of pending notifications, oldest first
    pub fn drain_notifications(&mut self) -> Result<String, JsError> {
        let events = self.editor.drain_notifications();
        serde_json::to_string(&events).map_err(|e| report(&e.to_string()))
    }

    /// Changes whenever anything visible changes
    pub fn version(&self) -> f64 {
        self.editor.version() as f64
    }

    /// Everything to draw this frame, as JSON. Mesh buffers are fetched
    /// separately with [`EditorHandle::mesh_vertices`] and
    /// [`EditorHandle::mesh_indices`].
    pub fn frame(&self) -> String {
        let items: Vec<Value> = self.editor.render_items().iter().map(item_json).collect();
        let highlights = self.editor.highlights();
        let draft = self.editor.draft().map(|d| {
            let c = d.center();
            let outline: Vec<[f32; 3]> = profile_outline(&d.profile())
                .iter()
                .map(|[x, z]| [c.x + x, 0.0, c.z + z])
                .collect();
            json!({ "tool": d.tool, "outline": outline })
        });
        let viewport = self.editor.viewport();
        let aspect = viewport.x / viewport.y;
        json!({
            "version": self.editor.version(),
            "mode": self.editor.mode().label(),
            "view_projection": self.editor.camera().view_projection(aspect).to_cols_array(),
            "eye": vec3(self.editor.camera().eye_position()),
            "items": items,
            "highlights": {
                "primary": highlights.primary.as_ref().map(highlight_json),
                "multi": highlights.multi.iter().map(aabb_json).collect::<Vec<_>>(),
            },
            "draft": draft,
        })
        .to_string()
    }

    /// Interleaved position/normal floats of a shape's mesh
    pub fn mesh_vertices(&self, id: &str) -> Option<js_sys::Float32Array> {
        self.with_mesh(id, |item| js_sys::Float32Array::from(item.mesh.vertices.as_slice()))
    }

    pub fn mesh_indices(&self, id: &str) -> Option<js_sys::Uint32Array> {
        self.with_mesh(id, |item| js_sys::Uint32Array::from(item.mesh.indices.as_slice()))
    }
}

impl EditorHandle {
    fn with_mesh<T>(&self, id: &str, f: impl FnOnce(&RenderItem<'_>) -> T) -> Option<T> {
        self.editor
            .render_items()
            .iter()
            .find(|item| item.id == id)
            .map(f)
    }

    #[cfg(test)]
    fn world_of(&self, id: &str) -> Option<Mat4> {
        self.with_mesh(id, |item| item.world)
    }
}
