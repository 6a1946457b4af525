//! Autosave/load functionality

use std::path::{Path, PathBuf};

use tracing::info;

use super::SceneState;
use crate::codec::{self, CodecError, DecodedScene};

impl SceneState {
    /// Get autosave file path
    #[cfg(not(target_arch = "wasm32"))]
    pub fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "forma", "forma")
            .map(|dirs| dirs.data_dir().join("autosave.json"))
    }

    /// Save scene to the autosave file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn autosave(&self) -> Result<Option<PathBuf>, CodecError> {
        let Some(path) = Self::autosave_path() else {
            return Ok(None);
        };
        self.save_to(&path)?;
        Ok(Some(path))
    }

    /// Load scene from the autosave file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_autosave() -> Option<DecodedScene> {
        Self::load_from(&Self::autosave_path()?).ok()
    }

    /// Write the exported document to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), CodecError> {
        let json = codec::to_json(&self.document())?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        info!(path = %path.display(), "Saved scene");
        Ok(())
    }

    /// Read and decode a document from `path`
    pub fn load_from(path: &Path) -> Result<DecodedScene, CodecError> {
        let json = std::fs::read_to_string(path)?;
        Ok(codec::decode(&codec::from_json(&json)?))
    }
}
