//! In-progress sketch capture on the ground plane

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::shape::{Profile, Sketch};

/// Profiles smaller than this are discarded on commit
pub const MIN_SKETCH_SIZE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SketchTool {
    Rectangle,
    Circle,
}

/// The single in-progress sketch while the pointer is held down.
///
/// Rectangle: `anchor` and `current` are opposite corners.
/// Circle: `anchor` is the center and `current` lies on the rim.
#[derive(Debug, Clone, PartialEq)]
pub struct SketchDraft {
    pub tool: SketchTool,
    pub anchor: Vec3,
    pub current: Vec3,
}

impl SketchDraft {
    pub fn new(tool: SketchTool, anchor: Vec3) -> Self {
        let anchor = Vec3::new(anchor.x, 0.0, anchor.z);
        Self {
            tool,
            anchor,
            current: anchor,
        }
    }

    pub fn update(&mut self, point: Vec3) {
        self.current = Vec3::new(point.x, 0.0, point.z);
    }

    /// Live preview profile
    pub fn profile(&self) -> Profile {
        let d = self.current - self.anchor;
        match self.tool {
            SketchTool::Rectangle => Profile::Rectangle {
                width: d.x.abs(),
                height: d.z.abs(),
            },
            SketchTool::Circle => Profile::Circle { radius: d.length() },
        }
    }

    pub fn center(&self) -> Vec3 {
        match self.tool {
            SketchTool::Rectangle => (self.anchor + self.current) * 0.5,
            SketchTool::Circle => self.anchor,
        }
    }

    /// The committed sketch, or `None` when the profile is below the minimum size
    pub fn finish(&self) -> Option<Sketch> {
        let big_enough = match self.profile() {
            Profile::Rectangle { width, height } => {
                width > MIN_SKETCH_SIZE && height > MIN_SKETCH_SIZE
            }
            Profile::Circle { radius } => radius > MIN_SKETCH_SIZE,
        };
        big_enough.then(|| Sketch::new(self.profile(), self.center()))
    }
}
