//! Persistence for profiles and the authorization flag.
//!
//! The session never touches storage directly; it goes through a
//! [`StateStore`]. The production store is a JSON file in the OS data
//! directory:
//! - Windows: %APPDATA%\nanny-ai\state.json
//! - macOS: ~/Library/Application Support/nanny-ai/state.json
//! - Linux: ~/.local/share/nanny-ai/state.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::model::{Profile, ProfileId};

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub authorized: bool,
    pub profiles: Vec<Profile>,
    /// Selection carried between CLI invocations
    pub active_profile_id: Option<ProfileId>,
}

/// Load/save capability for [`PersistedState`].
pub trait StateStore: Send {
    fn load(&self) -> Result<PersistedState, StoreError>;
    fn save(&self, state: &PersistedState) -> Result<(), StoreError>;
}

/// Persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to serialize state: {0}")]
    Serialize(serde_json::Error),
}

/// Get the default state file path
pub fn default_state_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("nanny-ai").join("state.json"))
}

/// JSON file store with atomic writes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`default_state_path`].
    pub fn open_default() -> Result<Self, StoreError> {
        default_state_path()
            .map(Self::new)
            .ok_or(StoreError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    /// Returns empty state if the file doesn't exist or can't be parsed.
    fn load(&self) -> Result<PersistedState, StoreError> {
        if !self.path.exists() {
            tracing::info!("No state file at {:?}, starting fresh", self.path);
            return Ok(PersistedState::default());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Read(self.path.clone(), e))?;

        match serde_json::from_str(&contents) {
            Ok(state) => {
                tracing::debug!("Loaded state from {:?}", self.path);
                Ok(state)
            }
            Err(e) => {
                tracing::error!("Failed to parse state file {:?}: {}", self.path, e);
                tracing::warn!("Starting with empty profiles");
                Ok(PersistedState::default())
            }
        }
    }

    fn save(&self, state: &PersistedState) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| StoreError::Write(dir.to_path_buf(), e))?;
        }

        let contents = serde_json::to_string_pretty(state).map_err(StoreError::Serialize)?;

        // Write atomically (write to temp, then rename)
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &contents)
            .map_err(|e| StoreError::Write(temp_path.clone(), e))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::Write(self.path.clone(), e))?;

        tracing::debug!("Saved state to {:?}", self.path);
        Ok(())
    }
}
