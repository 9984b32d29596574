//! Durable storage for desk state.
//!
//! The store keeps the whole list in memory and writes it through here as
//! one serialized blob under a fixed key. Absence of saved state is a
//! normal condition (first run), never an error.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{DeskError, DeskResult};

/// Blob storage under a fixed key.
pub trait DurableStore: Send {
    /// Persist the blob, replacing whatever was stored before.
    fn save(&self, blob: &str) -> DeskResult<()>;

    /// Load the stored blob. Returns `Ok(None)` when nothing was ever saved.
    fn load(&self) -> DeskResult<Option<String>>;
}

/// File-backed durable store: one JSON file per key inside the desk directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: &Path, key: &str) -> Self {
        JsonFileStore {
            path: dir.join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DurableStore for JsonFileStore {
    fn save(&self, blob: &str) -> DeskResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write to a temp file and rename so a crash mid-write can't leave
        // a truncated state file behind.
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, blob)?;
        std::fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    fn load(&self) -> DeskResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&self.path)?))
    }
}

/// In-memory durable store, mainly for tests. Clones share the same cell,
/// so a test can hand one handle to a store and inspect the other.
#[derive(Clone, Default)]
pub struct MemoryStore {
    blob: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl DurableStore for MemoryStore {
    fn save(&self, blob: &str) -> DeskResult<()> {
        let mut cell = self
            .blob
            .lock()
            .map_err(|_| DeskError::Serialization("Durable cell poisoned".to_string()))?;
        *cell = Some(blob.to_string());
        Ok(())
    }

    fn load(&self) -> DeskResult<Option<String>> {
        let cell = self
            .blob
            .lock()
            .map_err(|_| DeskError::Serialization("Durable cell poisoned".to_string()))?;
        Ok(cell.clone())
    }
}
