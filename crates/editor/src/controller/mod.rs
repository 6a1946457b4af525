//! The editor controller.
//!
//! [`Editor`] owns all mutable editing state: the scene store, selection, the
//! in-progress sketch, the active drag, settings and the camera the host
//! renders from. The host forwards pointer, keyboard and command events into it
//! and drains [`Notification`]s back out. Nothing here draws; the host reads
//! [`Editor::render_items`] and [`Editor::highlights`] each frame.

mod edit;
mod keyboard;
mod pointer;

pub use pointer::Modifiers;

use glam::{Mat4, Vec2, Vec3};

use crate::codec;
use crate::notification::Notification;
use crate::state::mode::InteractionMode;
use crate::state::scene::SceneState;
use crate::state::selection::{SelectionState, SelectionTarget};
use crate::state::settings::EditorSettings;
use crate::state::shape::{Shape, ShapeId};
use crate::state::sketch::SketchDraft;
use crate::state::transform::TransformController;
use crate::viewport::camera::ArcBallCamera;
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Aabb;

/// One mesh to draw, in world space
#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    pub id: &'a str,
    /// Top-level shape this mesh belongs to (itself unless grouped)
    pub owner: &'a str,
    pub world: Mat4,
    pub color: u32,
    pub mesh: &'a MeshData,
}

/// World-space highlight geometry for one selected entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Highlight {
    Bounds(Aabb),
    Triangle([Vec3; 3]),
    Segment([Vec3; 2]),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlights {
    pub primary: Option<Highlight>,
    /// One box per multi-selected shape
    pub multi: Vec<Aabb>,
}

pub struct Editor {
    scene: SceneState,
    selection: SelectionState,
    draft: Option<SketchDraft>,
    transform: TransformController,
    settings: EditorSettings,
    mode: InteractionMode,
    camera: ArcBallCamera,
    viewport: Vec2,
    outbox: Vec<Notification>,
    /// Last history revision announced to the host
    announced_history: u64,
    /// Bumped on mode, draft and camera changes
    ui_version: u64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}

impl Editor {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            scene: SceneState::with_history_limit(settings.history.max_depth),
            selection: SelectionState::default(),
            draft: None,
            transform: TransformController::default(),
            settings,
            mode: InteractionMode::Idle,
            camera: ArcBallCamera::new(),
            viewport: Vec2::new(800.0, 600.0),
            outbox: Vec::new(),
            announced_history: 0,
            ui_version: 0,
        }
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// In-progress sketch preview, if the pointer is down with a sketch tool
    pub fn draft(&self) -> Option<&SketchDraft> {
        self.draft.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.transform.is_dragging()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 && self.viewport != Vec2::new(width, height) {
            self.viewport = Vec2::new(width, height);
            self.ui_version += 1;
        }
    }

    pub fn camera(&self) -> &ArcBallCamera {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: ArcBallCamera) {
        self.camera = camera;
        self.ui_version += 1;
    }

    /// Orbit the camera by a pointer delta in pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.camera.rotate(dx, dy);
        self.ui_version += 1;
    }

    pub fn zoom(&mut self, delta: f32) {
        self.camera.zoom(delta);
        self.ui_version += 1;
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.camera.pan(dx, dy);
        self.ui_version += 1;
    }

    /// Revision covering scene, selection, mode, draft, camera and viewport changes
    pub fn version(&self) -> u64 {
        self.scene.version() + self.selection.version() + self.ui_version
    }

    /// Take all queued notifications
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.outbox)
    }

    /// Shape currently targeted by transforms: the primary selection's owner
    pub fn target_shape(&self) -> Option<&Shape> {
        self.scene.get(self.selection.owner()?)
    }

    // ── Render boundary ────────────────────────────────────────

    /// Every mesh-bearing shape, group children included, with its world matrix
    pub fn render_items(&self) -> Vec<RenderItem<'_>> {
        fn collect<'a>(
            shape: &'a Shape,
            owner: &'a str,
            parent: Mat4,
            out: &mut Vec<RenderItem<'a>>,
        ) {
            let world = parent * shape.transform.matrix();
            if let Some(mesh) = shape.mesh() {
                out.push(RenderItem {
                    id: &shape.id,
                    owner,
                    world,
                    color: shape.color,
                    mesh,
                });
            }
            for child in shape.children() {
                collect(child, owner, world, out);
            }
        }

        let mut items = Vec::new();
        for shape in self.scene.shapes() {
            collect(shape, &shape.id, Mat4::IDENTITY, &mut items);
        }
        items
    }

    /// Highlight geometry recomputed from current state
    pub fn highlights(&self) -> Highlights {
        let primary = self.selection.primary().and_then(|target| {
            let shape = self.scene.get(target.shape())?;
            let world = shape.transform.matrix();
            match target {
                SelectionTarget::Shape(_) => Some(Highlight::Bounds(shape.world_bounds(&Mat4::IDENTITY))),
                SelectionTarget::Face { index, .. } => {
                    let face = shape.faces().get(*index)?;
                    Some(Highlight::Triangle(
                        face.vertices.map(|v| world.transform_point3(v)),
                    ))
                }
                SelectionTarget::Edge { index, .. } => {
                    let edge = shape.edges().get(*index)?;
                    Some(Highlight::Segment([
                        world.transform_point3(edge.start),
                        world.transform_point3(edge.end),
                    ]))
                }
            }
        });

        let multi = self
            .selection
            .multi()
            .iter()
            .filter_map(|id| self.scene.get(id))
            .map(|s| s.world_bounds(&Mat4::IDENTITY))
            .collect();

        Highlights { primary, multi }
    }

    // ── Notification plumbing ──────────────────────────────────

    fn emit_selection(&mut self) {
        self.outbox
            .push(Notification::selection(self.selection.primary()));
    }

    fn emit_sketches(&mut self) {
        let list = self.scene.sketches().iter().map(codec::encode_sketch).collect();
        self.outbox.push(Notification::SketchesChanged { list });
    }

    /// Announce history availability if either stack changed since last time
    fn sync_history(&mut self) {
        let revision = self.scene.history_revision();
        if revision != self.announced_history {
            self.announced_history = revision;
            self.outbox.push(Notification::HistoryChanged {
                can_undo: self.scene.can_undo(),
                can_redo: self.scene.can_redo(),
            });
        }
    }

    /// Drop selection references to shapes no longer in the store
    fn prune_selection(&mut self) {
        let stale: Vec<ShapeId> = self
            .selection
            .owner()
            .into_iter()
            .chain(self.selection.multi())
            .filter(|id| self.scene.get(id).is_none())
            .cloned()
            .collect();
        if stale.is_empty() {
            return;
        }
        for id in &stale {
            self.selection.forget_shape(id);
        }
        self.emit_selection();
    }

    fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode != mode {
            // A draft belongs to the tool that started it
            self.mode = mode;
            self.draft = None;
            self.ui_version += 1;
        }
    }

    /// Replace the primary selection and announce it
    fn select_target(&mut self, target: SelectionTarget) {
        self.selection.select(target);
        self.emit_selection();
    }

    fn clear_selection(&mut self) {
        let had = self.selection.primary().is_some() || !self.selection.multi().is_empty();
        self.selection.clear();
        if had {
            self.emit_selection();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::state::shape::PrimitiveKind;

    #[test]
    fn test_render_items_include_group_children() {
        let mut editor = Editor::default();
        editor.scene.add_shape(fixtures::group_shape(
            "g",
            vec![
                fixtures::box_shape("a", Vec3::new(-1.0, 0.5, 0.0)),
                fixtures::sphere_shape("b", Vec3::new(1.0, 0.5, 0.0)),
            ],
        ));
        editor.scene.add_shape(fixtures::box_shape("c", Vec3::ZERO));

        let items = editor.render_items();
        let ids: Vec<_> = items.iter().map(|i| (i.id, i.owner)).collect();
        assert_eq!(ids, [("a", "g"), ("b", "g"), ("c", "c")]);
        assert_eq!(items[1].world.w_axis.truncate(), Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_highlights_follow_transform() {
        let mut editor = Editor::default();
        let id = editor.create_shape(PrimitiveKind::Box, Some(Vec3::ZERO)).unwrap();
        editor.select_shape(Some(&id));
        editor.set_shape_transform(Some(Vec3::new(5.0, 0.5, 0.0)), None, None);

        match editor.highlights().primary {
            Some(Highlight::Bounds(aabb)) => {
                assert!((aabb.center() - Vec3::new(5.0, 0.5, 0.0)).length() < 1e-5)
            }
            other => panic!("unexpected highlight {other:?}"),
        }
    }

    #[test]
    fn test_history_notifications_only_on_stack_change() {
        let mut editor = Editor::default();
        editor.create_shape(PrimitiveKind::Sphere, Some(Vec3::ZERO));
        let events = editor.drain_notifications();
        assert!(events.contains(&Notification::HistoryChanged {
            can_undo: true,
            can_redo: false
        }));

        editor.set_snap_to_grid(true);
        assert!(!editor
            .drain_notifications()
            .iter()
            .any(|n| matches!(n, Notification::HistoryChanged { .. })));
    }

    #[test]
    fn test_camera_moves_bump_version() {
        let mut editor = Editor::default();
        let start = editor.version();
        editor.orbit(10.0, 0.0);
        let orbited = editor.version();
        assert!(orbited > start);
        editor.zoom(1.0);
        assert!(editor.version() > orbited);
        let zoomed = editor.version();
        editor.pan(5.0, 5.0);
        assert!(editor.version() > zoomed);

        let panned = editor.version();
        editor.set_viewport(1024.0, 768.0);
        assert!(editor.version() > panned);
        let resized = editor.version();
        editor.set_viewport(1024.0, 768.0);
        assert_eq!(editor.version(), resized);
    }
}
