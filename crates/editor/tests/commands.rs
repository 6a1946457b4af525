//! JSON command protocol: string in, response and notifications out.

use forma_editor::command::{execute_json, execute_json_batch};
use forma_editor::harness::TestHarness;
use forma_editor::notification::Notification;

#[test]
fn test_create_and_inspect() {
    let mut h = TestHarness::new();
    let resp = execute_json(
        &mut h,
        r#"{"command": "create_shape", "kind": "sphere", "at": {"x": 1, "y": 0, "z": 2}}"#,
    )
    .unwrap();
    assert!(resp.success);
    let id = resp.data.unwrap()["id"].as_str().unwrap().to_string();

    let data = execute_json(&mut h, r#"{"command": "inspect"}"#)
        .unwrap()
        .data
        .unwrap();
    assert_eq!(data["shape_count"], 1);
    assert_eq!(data["shapes"][0]["id"], id.as_str());
    assert_eq!(data["shapes"][0]["kind"], "sphere");
    assert_eq!(data["selection"]["shape"], id.as_str());
    assert_eq!(data["can_undo"], true);
}

#[test]
fn test_batch_workflow() {
    let mut h = TestHarness::new();
    let json = r#"[
        {"command": "create_shape", "kind": "box", "at": {"x": 0, "y": 0, "z": 0}},
        {"command": "update_shape", "dimensions": {"width": 2, "height": 4}},
        {"command": "set_shape_color", "color": 16711680},
        {"command": "set_shape_transform", "position": {"x": 5, "y": 2, "z": 0}},
        {"command": "inspect"}
    ]"#;
    let responses = execute_json_batch(&mut h, json).unwrap();
    assert_eq!(responses.len(), 5);
    for resp in &responses {
        assert!(resp.success, "Failed: {:?}", resp.error);
    }
    let shape = &responses[4].data.as_ref().unwrap()["shapes"][0];
    assert_eq!(shape["color"], 0xff0000);
    assert_eq!(shape["position"][0], 5.0);

    for _ in 0..4 {
        assert!(h.undo());
    }
    assert!(!h.undo());
    assert_eq!(h.shape_count(), 0);
}

#[test]
fn test_invalid_values_are_ignored() {
    let mut h = TestHarness::new();
    execute_json(&mut h, r#"{"command": "create_shape", "kind": "cylinder", "at": {"x": 0, "y": 0, "z": 0}}"#)
        .unwrap();
    let resp = execute_json(&mut h, r#"{"command": "update_shape", "dimensions": {"radius": -1}}"#)
        .unwrap();
    assert_eq!(resp.data.unwrap()["updated"], false);

    let resp = execute_json(&mut h, r#"{"command": "set_grid_size", "size": 0}"#).unwrap();
    assert!(!resp.success);

    let resp = execute_json(&mut h, r#"{"command": "extrude", "sketch_index": 3, "height": 1}"#)
        .unwrap();
    assert!(resp.data.unwrap()["id"].is_null());
}

#[test]
fn test_unknown_command_rejected() {
    let mut h = TestHarness::new();
    assert!(execute_json(&mut h, r#"{"command": "fly_away"}"#).is_err());
    assert!(execute_json_batch(&mut h, "not json").is_err());
}

#[test]
fn test_select_unknown_shape_fails() {
    let mut h = TestHarness::new();
    let resp = execute_json(&mut h, r#"{"command": "select_shape", "id": "missing"}"#).unwrap();
    assert!(!resp.success);
}

#[test]
fn test_history_notifications() {
    let mut h = TestHarness::new();
    h.drain_notifications();
    execute_json(&mut h, r#"{"command": "create_shape", "kind": "box", "at": {"x": 0, "y": 0, "z": 0}}"#)
        .unwrap();
    execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();

    let history: Vec<_> = h
        .drain_notifications()
        .into_iter()
        .filter(|n| matches!(n, Notification::HistoryChanged { .. }))
        .collect();
    assert_eq!(
        history,
        [
            Notification::HistoryChanged {
                can_undo: true,
                can_redo: false
            },
            Notification::HistoryChanged {
                can_undo: false,
                can_redo: true
            },
        ]
    );
}
