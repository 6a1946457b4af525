//! Drag sessions and transform math for translate / rotate / scale

use glam::{Vec2, Vec3};

use super::mode::TransformMode;
use super::settings::{SnapSettings, TransformSettings};
use super::shape::{ShapeId, Transform};

/// Smallest scale factor a drag or key step can produce
pub const MIN_SCALE: f32 = 0.01;

/// Where a drag started
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragAnchor {
    /// Ground-plane intersection (translate)
    Ground(Vec3),
    /// Raw pointer position (rotate, scale)
    Screen(Vec2),
}

/// One pointer drag on one shape
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub shape: ShapeId,
    pub mode: TransformMode,
    /// Transform of the shape when the drag began
    pub start: Transform,
    pub anchor: DragAnchor,
}

/// Discrete step direction from arrow / WASD keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKey {
    Left,
    Right,
    Up,
    Down,
}

/// Tracks the active drag, if any
#[derive(Debug, Default)]
pub struct TransformController {
    session: Option<DragSession>,
}

impl TransformController {
    pub fn begin(&mut self, session: DragSession) {
        self.session = Some(session);
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// End the drag, keeping whatever transform was last applied
    pub fn end(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

/// Round to the nearest multiple of `grid`
pub fn snap_value(v: f32, grid: f32) -> f32 {
    (v / grid).round() * grid
}

/// Snap the horizontal components of a point when snapping is enabled
pub fn snap_ground(p: Vec3, snap: &SnapSettings) -> Vec3 {
    if !snap.enabled {
        return p;
    }
    Vec3::new(
        snap_value(p.x, snap.grid_size),
        p.y,
        snap_value(p.z, snap.grid_size),
    )
}

/// Apply a drag to the starting transform. `ground` is the current pointer
/// ground point (translate), `screen` the current pointer position.
pub fn apply_drag(
    session: &DragSession,
    ground: Option<Vec3>,
    screen: Vec2,
    settings: &TransformSettings,
    snap: &SnapSettings,
) -> Option<Transform> {
    let start = session.start;
    match (session.mode, session.anchor) {
        (TransformMode::Translate, DragAnchor::Ground(anchor)) => {
            let delta = ground? - anchor;
            let moved = start.position + Vec3::new(delta.x, 0.0, delta.z);
            Some(Transform {
                position: snap_ground(moved, snap),
                ..start
            })
        }
        (TransformMode::Rotate, DragAnchor::Screen(anchor)) => {
            let yaw = start.rotation.y + (screen.x - anchor.x) * settings.rotate_sensitivity;
            Some(Transform {
                rotation: Vec3::new(start.rotation.x, yaw, start.rotation.z),
                ..start
            })
        }
        (TransformMode::Scale, DragAnchor::Screen(anchor)) => {
            let factor = (1.0 + (screen.y - anchor.y) * settings.scale_sensitivity).max(MIN_SCALE);
            Some(Transform {
                scale: start.scale * factor,
                ..start
            })
        }
        _ => None,
    }
}

/// One discrete key step
pub fn apply_step(
    mode: TransformMode,
    current: Transform,
    key: StepKey,
    settings: &TransformSettings,
    snap: &SnapSettings,
) -> Transform {
    match mode {
        TransformMode::Translate => {
            let s = settings.translate_step;
            let delta = match key {
                StepKey::Left => Vec3::new(-s, 0.0, 0.0),
                StepKey::Right => Vec3::new(s, 0.0, 0.0),
                StepKey::Up => Vec3::new(0.0, 0.0, -s),
                StepKey::Down => Vec3::new(0.0, 0.0, s),
            };
            Transform {
                position: snap_ground(current.position + delta, snap),
                ..current
            }
        }
        TransformMode::Rotate => {
            let step = settings.rotate_step_degrees.to_radians();
            let delta = match key {
                StepKey::Left | StepKey::Down => -step,
                StepKey::Right | StepKey::Up => step,
            };
            let mut rotation = current.rotation;
            rotation.y += delta;
            Transform { rotation, ..current }
        }
        TransformMode::Scale => {
            let factor = match key {
                StepKey::Up | StepKey::Right => 1.0 + settings.scale_step,
                StepKey::Down | StepKey::Left => 1.0 - settings.scale_step,
            };
            Transform {
                scale: (current.scale * factor).max(Vec3::splat(MIN_SCALE)),
                ..current
            }
        }
    }
}
