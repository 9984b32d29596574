//! Desk root directory management.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use config::{Config, File};

use crate::config::{DeskConfig, RemoteSettings};
use crate::durable::JsonFileStore;
use crate::error::{DeskError, DeskResult};
use crate::habit::HabitStore;
use crate::remote::provider::Provider;
use crate::remote::{ProviderRemote, RemoteCollection};
use crate::store::AssignmentStore;

/// Durable keys and remote collection names. The same word names both
/// sides so a document round-trips without any mapping layer.
pub const ASSIGNMENTS: &str = "assignments";
pub const HABITS: &str = "habits";

#[derive(Clone)]
pub struct Desk {
    config: DeskConfig,
}

impl Desk {
    pub fn load() -> DeskResult<Self> {
        let config_path = DeskConfig::config_path()?;

        if !config_path.exists() {
            DeskConfig::create_default_config(&config_path)?;
        }

        let config: DeskConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| DeskError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| DeskError::Config(e.to_string()))?;

        Ok(Desk { config })
    }

    /// Build a desk from an already loaded config. Tests and tools that
    /// manage their own config files come through here.
    pub fn from_config(config: DeskConfig) -> Self {
        Desk { config }
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.desk_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Returns the desk directory path in display-friendly form,
    /// keeping `~` instead of expanding to the full home directory.
    pub fn display_path(&self) -> PathBuf {
        self.config.desk_dir.clone()
    }

    pub fn remote_settings(&self) -> Option<&RemoteSettings> {
        self.config.remote.as_ref()
    }

    /// Durable store for one key inside the desk directory.
    pub fn durable(&self, key: &str) -> JsonFileStore {
        JsonFileStore::new(&self.data_path(), key)
    }

    /// Remote collection handle, when a `[remote]` section is configured.
    pub fn remote(&self, collection: &str) -> Option<Arc<dyn RemoteCollection>> {
        let settings = self.config.remote.as_ref()?;
        Some(Arc::new(ProviderRemote::new(
            Provider::from_name(&settings.provider),
            &settings.user,
            collection,
            Duration::from_secs(settings.poll_interval_secs),
        )))
    }

    /// Like [`Desk::remote`], but an error when no remote is configured.
    /// Commands that exist only to talk to the remote use this.
    pub fn require_remote(&self, collection: &str) -> DeskResult<Arc<dyn RemoteCollection>> {
        self.remote(collection).ok_or(DeskError::NoRemoteConfigured)
    }

    /// Open the assignment store wired to this desk: durable storage in
    /// the desk directory, mirroring to the configured remote (if any).
    pub fn assignment_store(&self) -> DeskResult<AssignmentStore> {
        let mut store = AssignmentStore::open(Box::new(self.durable(ASSIGNMENTS)))?;
        if let Some(remote) = self.remote(ASSIGNMENTS) {
            store = store.with_remote(remote);
        }
        Ok(store)
    }

    /// Open the habit store wired to this desk.
    pub fn habit_store(&self) -> DeskResult<HabitStore> {
        let mut store = HabitStore::open(Box::new(self.durable(HABITS)))?;
        if let Some(remote) = self.remote(HABITS) {
            store = store.with_remote(remote);
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk_with_dir(dir: &std::path::Path) -> Desk {
        Desk::from_config(DeskConfig {
            desk_dir: dir.to_path_buf(),
            remote: None,
        })
    }

    #[test]
    fn stores_share_the_desk_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let desk = desk_with_dir(dir.path());

        let mut assignments = desk.assignment_store().unwrap();
        assignments.add("Essay", "History", "2026-09-10").unwrap();
        let mut habits = desk.habit_store().unwrap();
        habits.add("Read 20 pages").unwrap();

        assert!(dir.path().join("assignments.json").exists());
        assert!(dir.path().join("habits.json").exists());
    }

    #[test]
    fn no_remote_configured_is_an_error_only_when_required() {
        let dir = tempfile::TempDir::new().unwrap();
        let desk = desk_with_dir(dir.path());

        assert!(desk.remote(ASSIGNMENTS).is_none());
        assert!(matches!(
            desk.require_remote(ASSIGNMENTS),
            Err(DeskError::NoRemoteConfigured)
        ));
    }
}
