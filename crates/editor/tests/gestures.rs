//! Pointer and keyboard workflows driven through the headless harness.

use forma_editor::harness::TestHarness;
use forma_editor::state::{
    InteractionMode, PrimitiveKind, SelectionKind, SelectionTarget, ShapeKind, TransformMode,
};
use forma_editor::state::sketch::SketchTool;
use forma_editor::state::EditorSettings;
use forma_editor::viewport::camera::ArcBallCamera;
use forma_editor::Modifiers;
use glam::Vec3;
use serde_json::Value;

fn assert_near(actual: Vec3, expected: Vec3) {
    assert!(
        (actual - expected).length() < 1e-2,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn test_translate_drag_then_undo() {
    let mut h = TestHarness::new();
    let id = h.place(PrimitiveKind::Box, Vec3::ZERO).unwrap();
    h.set_transform_mode(Some(TransformMode::Translate));

    assert!(h.drag_ground(Vec3::ZERO, Vec3::new(3.0, 0.0, 2.0)));
    assert!(!h.is_dragging());
    assert_near(h.position_of(&id).unwrap(), Vec3::new(3.0, 0.5, 2.0));

    assert!(h.undo());
    assert_near(h.position_of(&id).unwrap(), Vec3::new(0.0, 0.5, 0.0));
    assert!(h.redo());
    assert_near(h.position_of(&id).unwrap(), Vec3::new(3.0, 0.5, 2.0));
}

#[test]
fn test_translate_drag_snaps_to_grid() {
    let mut h = TestHarness::new();
    h.set_snap_to_grid(true);
    let id = h.place(PrimitiveKind::Cylinder, Vec3::ZERO).unwrap();
    assert_eq!(h.position_of(&id).unwrap(), Vec3::new(0.0, 0.5, 0.0));

    h.set_transform_mode(Some(TransformMode::Translate));
    assert!(h.drag_ground(Vec3::ZERO, Vec3::new(2.3, 0.0, 1.6)));
    assert_eq!(h.position_of(&id).unwrap(), Vec3::new(2.0, 0.5, 2.0));
}

#[test]
fn test_drag_records_single_history_entry() {
    let mut h = TestHarness::new();
    let id = h.place(PrimitiveKind::Sphere, Vec3::ZERO).unwrap();
    h.set_transform_mode(Some(TransformMode::Translate));
    h.drag_ground(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

    assert!(h.undo());
    assert!(h.undo());
    assert!(h.scene().get(&id).is_none());
    assert!(!h.scene().can_undo());
}

#[test]
fn test_rotate_and_scale_drags() {
    let mut h = TestHarness::new();
    let id = h.place(PrimitiveKind::Box, Vec3::ZERO).unwrap();
    let center = glam::Vec2::new(400.0, 300.0);

    h.set_transform_mode(Some(TransformMode::Rotate));
    h.drag_screen(center, glam::Vec2::new(100.0, 0.0));
    let rotation = h.scene().get(&id).unwrap().transform.rotation;
    assert!((rotation.y - 1.0).abs() < 1e-4);
    assert_eq!(rotation.x, 0.0);

    h.set_transform_mode(Some(TransformMode::Scale));
    h.drag_screen(center, glam::Vec2::new(0.0, 50.0));
    let scale = h.scene().get(&id).unwrap().transform.scale;
    assert!((scale - Vec3::splat(1.5)).length() < 1e-4);
}

#[test]
fn test_sketch_rectangle_then_extrude() {
    let mut h = TestHarness::new();
    h.set_snap_to_grid(true);
    h.set_sketch_mode(true);
    assert!(h.sketch(SketchTool::Rectangle, Vec3::ZERO, Vec3::new(2.0, 0.0, 3.0)));
    assert_eq!(h.sketch_count(), 1);

    let id = h.extrude(0, 1.0).unwrap();
    assert_eq!(h.sketch_count(), 0);
    let shape = h.scene().get(&id).unwrap();
    assert!(matches!(shape.kind(), ShapeKind::Extruded { height, .. } if *height == 1.0));
    assert_near(shape.transform.position, Vec3::new(1.0, 0.5, 1.5));

    let v = h.validate_mesh(&id).unwrap();
    assert!(v.validate_all().is_empty());
    assert!(v.dimensions_approx(Vec3::new(2.0, 1.0, 3.0), 1e-3));

    let doc: Value = serde_json::from_str(&h.export_scene().unwrap()).unwrap();
    let object = &doc["objects"][0];
    assert_eq!(object["type"], "extruded");
    assert_eq!(object["extrusionHeight"], 1.0);
    assert_eq!(object["sketchData"]["type"], "rectangle");
    assert!(doc["sketches"].as_array().unwrap().is_empty());
}

#[test]
fn test_tiny_sketch_is_discarded() {
    let mut h = TestHarness::new();
    h.sketch(SketchTool::Circle, Vec3::ZERO, Vec3::new(0.001, 0.0, 0.0));
    assert_eq!(h.sketch_count(), 0);
    assert!(h.draft().is_none());
    assert_eq!(h.mode(), InteractionMode::Sketching(Some(SketchTool::Circle)));
}

#[test]
fn test_pick_edge_face_and_shape() {
    let mut h = TestHarness::front_view(10.0);
    let id = h.create_shape(PrimitiveKind::Box, Some(Vec3::ZERO)).unwrap();

    // Just inside the front-right vertical edge
    assert!(h.click_world(Vec3::new(0.495, 0.5, 0.5), Modifiers::NONE));
    let Some(SelectionTarget::Edge { shape, index }) = h.selection().primary().cloned() else {
        panic!("expected an edge, got {:?}", h.selection().primary());
    };
    assert_eq!(shape, id);
    let edge = h.scene().get(&id).unwrap().edges()[index];
    for end in [edge.start, edge.end] {
        assert!((end.x - 0.5).abs() < 1e-4 && (end.z - 0.5).abs() < 1e-4);
    }

    assert!(h.click_world(Vec3::new(0.495, 0.5, 0.5), Modifiers::CTRL));
    let Some(SelectionTarget::Face { index, .. }) = h.selection().primary().cloned() else {
        panic!("expected a face, got {:?}", h.selection().primary());
    };
    let face = &h.scene().get(&id).unwrap().faces()[index];
    assert_near(face.normal, Vec3::Z);

    assert!(h.click_world(Vec3::new(0.0, 0.15, 0.5), Modifiers::NONE));
    assert_eq!(h.selection().primary().map(|t| t.kind()), Some(SelectionKind::Shape));

    // Empty space clears
    h.click(glam::Vec2::new(20.0, 20.0), Modifiers::NONE);
    assert!(h.selection().primary().is_none());
}

#[test]
fn test_shift_click_group_and_ungroup() {
    let mut h = TestHarness::front_view(10.0);
    let a = h
        .create_shape(PrimitiveKind::Box, Some(Vec3::new(-2.0, 0.0, 0.0)))
        .unwrap();
    let b = h
        .create_shape(PrimitiveKind::Box, Some(Vec3::new(2.0, 0.0, 0.0)))
        .unwrap();

    h.click_world(Vec3::new(-2.0, 0.15, 0.5), Modifiers::NONE);
    h.click_world(Vec3::new(2.0, 0.15, 0.5), Modifiers::SHIFT);
    assert_eq!(h.selection().multi(), [a.clone(), b.clone()]);

    let group = h.group_selected().unwrap();
    assert_eq!(h.shape_count(), 1);
    assert!(h.scene().get(&group).unwrap().is_group());

    // Clicking a child selects the group
    h.click_world(Vec3::new(2.0, 0.15, 0.5), Modifiers::NONE);
    assert_eq!(h.selection().owner(), Some(&group));

    let children = h.ungroup_selected().unwrap();
    assert_eq!(children, [a.clone(), b.clone()]);
    assert_eq!(h.shape_count(), 2);
    assert_near(h.position_of(&a).unwrap(), Vec3::new(-2.0, 0.5, 0.0));
    assert_near(h.position_of(&b).unwrap(), Vec3::new(2.0, 0.5, 0.0));

    assert!(h.undo());
    assert_eq!(h.shape_count(), 1);
}

#[test]
fn test_arrow_keys_and_escape() {
    let mut h = TestHarness::new();
    let id = h.place(PrimitiveKind::Box, Vec3::ZERO).unwrap();
    h.set_transform_mode(Some(TransformMode::Rotate));
    assert!(h.key("ArrowRight", false, false));
    let yaw = h.scene().get(&id).unwrap().transform.rotation.y;
    assert!((yaw - 15f32.to_radians()).abs() < 1e-4);

    assert!(h.key("Escape", false, false));
    assert_eq!(h.mode(), InteractionMode::Idle);
    assert!(!h.key("ArrowRight", false, false));
}

#[test]
fn test_undo_all_then_redo_all_restores_document() {
    let mut h = TestHarness::new();
    let mut states = vec![h.export_scene().unwrap()];

    let a = h
        .create_shape(PrimitiveKind::Box, Some(Vec3::new(-2.0, 0.0, 0.0)))
        .unwrap();
    states.push(h.export_scene().unwrap());
    let b = h
        .create_shape(PrimitiveKind::Box, Some(Vec3::new(2.0, 0.0, 0.0)))
        .unwrap();
    states.push(h.export_scene().unwrap());

    h.set_transform_mode(Some(TransformMode::Translate));
    assert!(h.drag_ground(Vec3::new(2.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 1.0)));
    assert_near(h.position_of(&b).unwrap(), Vec3::new(2.0, 0.5, 1.0));
    states.push(h.export_scene().unwrap());

    assert!(h.sketch(
        SketchTool::Rectangle,
        Vec3::new(-4.0, 0.0, 2.0),
        Vec3::new(-3.0, 0.0, 3.0)
    ));
    states.push(h.export_scene().unwrap());
    h.extrude(0, 1.0).unwrap();
    states.push(h.export_scene().unwrap());

    h.set_transform_mode(None);
    h.set_camera(ArcBallCamera::front(Vec3::ZERO, 10.0));
    h.click_world(Vec3::new(-2.0, 0.15, 0.5), Modifiers::NONE);
    h.click_world(Vec3::new(2.0, 0.15, 0.5), Modifiers::SHIFT);
    assert_eq!(h.selection().multi(), [a, b]);
    h.group_selected().unwrap();
    states.push(h.export_scene().unwrap());

    let last = states.len() - 1;
    for expected in states[..last].iter().rev() {
        assert!(h.undo());
        assert_eq!(&h.export_scene().unwrap(), expected);
    }
    assert!(!h.scene().can_undo());
    assert_eq!(h.shape_count(), 0);

    for expected in &states[1..] {
        assert!(h.redo());
        assert_eq!(&h.export_scene().unwrap(), expected);
    }
    assert!(!h.scene().can_redo());
    assert_eq!(h.export_scene().unwrap(), states[last]);
}

#[test]
fn test_overflowing_rotate_sensitivity_keeps_scene_restorable() {
    let mut settings = EditorSettings::default();
    settings.transform.rotate_sensitivity = f32::INFINITY;
    let mut h = TestHarness::with_settings(settings);
    let id = h.place(PrimitiveKind::Box, Vec3::ZERO).unwrap();

    h.set_transform_mode(Some(TransformMode::Rotate));
    let center = h.screen_of(Vec3::new(0.0, 0.5, 0.0)).unwrap();
    h.drag_screen(center, glam::Vec2::ZERO);
    let rotation = h.scene().get(&id).unwrap().transform.rotation;
    assert!(rotation.is_finite());

    let json = h.export_scene().unwrap();
    let mut other = TestHarness::new();
    other.import_scene(&json).unwrap();
    assert_eq!(other.shape_count(), 1);

    assert!(h.undo());
    assert!(h.undo());
    assert_eq!(h.shape_count(), 0);
}
