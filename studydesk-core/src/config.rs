//! Global studydesk configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, DeskResult};

static DEFAULT_DESK_PATH: &str = "~/studydesk";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

fn default_desk_path() -> PathBuf {
    PathBuf::from(DEFAULT_DESK_PATH)
}

fn is_default_desk_path(p: &PathBuf) -> bool {
    *p == default_desk_path()
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

/// Global configuration at ~/.config/studydesk/config.toml
///
/// Provider-specific configuration (credentials, storage location) lives
/// with each provider, not here. The desk only needs to know which
/// provider to run and which user's collections to ask for.
#[derive(Serialize, Deserialize, Clone)]
pub struct DeskConfig {
    #[serde(default = "default_desk_path", skip_serializing_if = "is_default_desk_path")]
    pub desk_dir: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<RemoteSettings>,
}

/// The `[remote]` section: where lists get mirrored to.
#[derive(Serialize, Deserialize, Clone)]
pub struct RemoteSettings {
    /// Provider name; resolves to a `studydesk-provider-<name>` binary.
    pub provider: String,
    /// User whose collections hold the mirrored documents.
    pub user: String,
    /// How often subscriptions poll the provider for changes.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

impl Default for DeskConfig {
    fn default() -> Self {
        DeskConfig {
            desk_dir: default_desk_path(),
            remote: None,
        }
    }
}

impl DeskConfig {
    pub fn config_path() -> DeskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DeskError::Config("Could not determine config directory".into()))?
            .join("studydesk");

        Ok(config_dir.join("config.toml"))
    }

    /// Save the current config to ~/.config/studydesk/config.toml
    pub fn save(&self) -> DeskResult<()> {
        let config_path = Self::config_path()?;

        let content = toml::to_string_pretty(self).map_err(|e| DeskError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| DeskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &std::path::Path) -> DeskResult<()> {
        let contents = format!(
            "\
# studydesk configuration

# Where your desk state lives:
# desk_dir = \"{}\"

# Mirror assignments and habits to a remote collection:
# [remote]
# provider = \"folder\"
# user = \"me\"
# poll_interval_secs = {}
",
            DEFAULT_DESK_PATH, DEFAULT_POLL_INTERVAL_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DeskError::Config(format!("Could not create config directory: {e}")))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| DeskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config: DeskConfig = toml::from_str("").unwrap();
        assert_eq!(config.desk_dir, PathBuf::from("~/studydesk"));
        assert!(config.remote.is_none());
    }

    #[test]
    fn remote_section_defaults_the_poll_interval() {
        let config: DeskConfig = toml::from_str(
            r#"
            [remote]
            provider = "folder"
            user = "amelia"
            "#,
        )
        .unwrap();

        let remote = config.remote.unwrap();
        assert_eq!(remote.provider, "folder");
        assert_eq!(remote.user, "amelia");
        assert_eq!(remote.poll_interval_secs, 10);
    }

    #[test]
    fn default_values_are_not_serialized() {
        let rendered = toml::to_string_pretty(&DeskConfig::default()).unwrap();
        assert_eq!(rendered.trim(), "");
    }
}
