//! Durable coordinator state: a small RON file, written atomically.
//!
//! The session counter is written for inspection but never restored; a fresh
//! process always starts it at zero.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use veil_logging::{veil_info, veil_warn};

const STATE_FILENAME: &str = "veil_state.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state directory missing or not writable: {0}")]
    StateDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize state: {0}")]
    Encode(#[from] ron::Error),
}

/// Persisted key/value layout. Field names match the storage keys the
/// protocol documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PersistedStats {
    pub is_paused: bool,
    pub lifetime_hidden_count: u64,
    pub session_hidden_count: u64,
}

/// Loads and saves [`PersistedStats`] under a state directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILENAME)
    }

    /// Reads persisted stats. A missing file is a first run and yields the
    /// defaults; an unreadable or corrupt file is logged and also falls back
    /// to the defaults. Load never fails.
    pub fn load(&self) -> PersistedStats {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                veil_info!("no persisted state at {path:?}; starting with defaults");
                return PersistedStats::default();
            }
            Err(err) => {
                veil_warn!("failed to read persisted state from {path:?}: {err}");
                return PersistedStats::default();
            }
        };

        match ron::from_str(&content) {
            Ok(stats) => stats,
            Err(err) => {
                veil_warn!("failed to parse persisted state from {path:?}: {err}");
                PersistedStats::default()
            }
        }
    }

    /// Writes stats atomically: temp file in the same directory, then rename.
    pub fn save(&self, stats: &PersistedStats) -> Result<(), PersistError> {
        ensure_state_dir(&self.dir)?;

        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(stats, pretty)?;

        let target = self.path();
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Replace existing file if present to keep determinism.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(())
    }
}

/// Ensure the state directory exists; create if missing.
fn ensure_state_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::StateDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
    }
    Ok(())
}
