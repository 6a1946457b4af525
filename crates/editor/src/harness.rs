//! Headless test harness for driving the editor with world-space gestures.
//!
//! Wraps an [`Editor`] with a fixed viewport and converts world points to
//! pointer positions through the editor's camera, so tests and scripts can say
//! "drag from here to there on the ground" instead of computing pixels.

use std::ops::{Deref, DerefMut};

use glam::{Vec2, Vec3};

use crate::controller::{Editor, Modifiers};
use crate::state::settings::EditorSettings;
use crate::state::shape::{PrimitiveKind, ShapeId};
use crate::state::sketch::SketchTool;
use crate::validation::MeshValidator;
use crate::viewport::camera::ArcBallCamera;
use crate::viewport::mesh::MeshData;

pub const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

/// Headless harness around an editor
pub struct TestHarness {
    pub editor: Editor,
}

impl TestHarness {
    /// Create a new empty harness with the default angled camera.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let mut editor = Editor::new(settings);
        editor.set_viewport(VIEWPORT.x, VIEWPORT.y);
        Self { editor }
    }

    /// Harness looking at the origin from +Z, without pitch
    pub fn front_view(distance: f32) -> Self {
        let mut h = Self::new();
        h.editor.set_camera(ArcBallCamera::front(Vec3::ZERO, distance));
        h
    }

    // ── Pointer gestures ──────────────────────────────────────

    /// Pixel position of a world point, if it is in front of the camera
    pub fn screen_of(&self, world: Vec3) -> Option<Vec2> {
        self.editor.camera().project(world, self.editor.viewport())
    }

    /// Press and release at a screen position
    pub fn click(&mut self, screen: Vec2, mods: Modifiers) {
        self.editor.pointer_down(screen, mods);
        self.editor.pointer_up(screen);
    }

    /// Click on a world point. False if the point cannot be projected.
    pub fn click_world(&mut self, world: Vec3, mods: Modifiers) -> bool {
        let Some(screen) = self.screen_of(world) else {
            return false;
        };
        self.click(screen, mods);
        true
    }

    /// Press at one ground point, move through the midpoint, release at the other
    pub fn drag_ground(&mut self, from: Vec3, to: Vec3) -> bool {
        let (Some(a), Some(b), Some(mid)) = (
            self.screen_of(from),
            self.screen_of(to),
            self.screen_of((from + to) * 0.5),
        ) else {
            return false;
        };
        self.editor.pointer_down(a, Modifiers::NONE);
        self.editor.pointer_move(mid);
        self.editor.pointer_move(b);
        self.editor.pointer_up(b);
        true
    }

    /// Press, move and release by a pixel offset (rotate / scale drags)
    pub fn drag_screen(&mut self, from: Vec2, delta: Vec2) {
        self.editor.pointer_down(from, Modifiers::NONE);
        self.editor.pointer_move(from + delta * 0.5);
        self.editor.pointer_move(from + delta);
        self.editor.pointer_up(from + delta);
    }

    // ── Scene helpers ─────────────────────────────────────────

    /// Arm placement of `kind` and click the ground at `at`.
    /// Returns the id of the placed shape.
    pub fn place(&mut self, kind: PrimitiveKind, at: Vec3) -> Option<ShapeId> {
        let before = self.shape_count();
        self.editor.create_shape(kind, None);
        self.click_world(Vec3::new(at.x, 0.0, at.z), Modifiers::NONE);
        if self.shape_count() == before {
            return None;
        }
        self.editor.selection().owner().cloned()
    }

    /// Draw a sketch between two ground points with `tool`
    pub fn sketch(&mut self, tool: SketchTool, from: Vec3, to: Vec3) -> bool {
        self.editor.set_sketch_tool(Some(tool));
        self.drag_ground(from, to)
    }

    /// Number of top-level shapes
    pub fn shape_count(&self) -> usize {
        self.editor.scene().shapes().len()
    }

    pub fn sketch_count(&self) -> usize {
        self.editor.scene().sketches().len()
    }

    pub fn position_of(&self, id: &str) -> Option<Vec3> {
        self.editor.scene().get(id).map(|s| s.transform.position)
    }

    /// Get mesh data for a top-level shape
    pub fn mesh_of(&self, id: &str) -> Option<&MeshData> {
        self.editor.scene().get(id)?.mesh()
    }

    /// Create a validator for a shape's mesh
    pub fn validate_mesh(&self, id: &str) -> Option<MeshValidator<'_>> {
        self.mesh_of(id).map(MeshValidator::new)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for TestHarness {
    type Target = Editor;

    fn deref(&self) -> &Editor {
        &self.editor
    }
}

impl DerefMut for TestHarness {
    fn deref_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.shape_count(), 0);
        assert_eq!(h.viewport(), VIEWPORT);
    }

    #[test]
    fn test_place_on_ground_click() {
        let mut h = TestHarness::new();
        let id = h.place(PrimitiveKind::Box, Vec3::new(1.0, 0.0, -2.0)).unwrap();
        let pos = h.position_of(&id).unwrap();
        assert!((pos - Vec3::new(1.0, 0.5, -2.0)).length() < 1e-3);
    }

    #[test]
    fn test_sketch_commits() {
        let mut h = TestHarness::new();
        assert!(h.sketch(SketchTool::Circle, Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(h.sketch_count(), 1);
    }

    #[test]
    fn test_validate_mesh() {
        let mut h = TestHarness::new();
        let id = h.place(PrimitiveKind::Cylinder, Vec3::ZERO).unwrap();
        let v = h.validate_mesh(&id).unwrap();
        assert!(v.vertex_count() > 0);
        assert!(v.triangle_count() > 0);
    }
}
