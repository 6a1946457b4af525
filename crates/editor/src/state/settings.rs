//! Editor settings

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Grid snapping for placement, drags and key steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Enable snapping
    pub enabled: bool,
    /// Grid cell size in world units (always > 0)
    pub grid_size: f32,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            grid_size: 1.0,
        }
    }
}

/// Picking tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingSettings {
    /// Maximum pixel distance from pointer to a projected edge for edge selection
    pub edge_threshold_px: f32,
}

impl Default for PickingSettings {
    fn default() -> Self {
        Self {
            edge_threshold_px: 3.0,
        }
    }
}

/// Drag sensitivities and discrete key increments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSettings {
    /// Radians of yaw per pixel of horizontal drag
    pub rotate_sensitivity: f32,
    /// Scale factor change per pixel of vertical drag
    pub scale_sensitivity: f32,
    /// World units per translate key press
    pub translate_step: f32,
    /// Degrees of yaw per rotate key press
    pub rotate_step_degrees: f32,
    /// Relative scale change per scale key press
    pub scale_step: f32,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            rotate_sensitivity: 0.01,
            scale_sensitivity: 0.01,
            translate_step: 0.5,
            rotate_step_degrees: 15.0,
            scale_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo snapshots kept
    pub max_depth: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

/// All editor settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub snap: SnapSettings,
    pub picking: PickingSettings,
    pub transform: TransformSettings,
    pub history: HistorySettings,
}

impl EditorSettings {
    /// Load settings from the platform config directory, or defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Save settings to the platform config directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) -> std::io::Result<()> {
        match Self::config_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "forma", "forma")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load from an explicit file. Missing or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(json) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str::<Self>(&json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                warn!(path = %path.display(), "Ignoring malformed settings file: {e}");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Replace out-of-range values with their defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.snap.grid_size.is_finite() && self.snap.grid_size > 0.0) {
            self.snap.grid_size = defaults.snap.grid_size;
        }
        if !(self.picking.edge_threshold_px.is_finite() && self.picking.edge_threshold_px >= 0.0) {
            self.picking.edge_threshold_px = defaults.picking.edge_threshold_px;
        }
        if self.history.max_depth == 0 {
            self.history.max_depth = defaults.history.max_depth;
        }

        let t = &mut self.transform;
        let d = &defaults.transform;
        for (value, fallback) in [
            (&mut t.rotate_sensitivity, d.rotate_sensitivity),
            (&mut t.scale_sensitivity, d.scale_sensitivity),
            (&mut t.translate_step, d.translate_step),
            (&mut t.rotate_step_degrees, d.rotate_step_degrees),
            (&mut t.scale_step, d.scale_step),
        ] {
            if !value.is_finite() {
                *value = fallback;
            }
        }
        self
    }
}
