//! Configuration for the folder provider.
//!
//! The storage root lives in:
//!   ~/.config/studydesk/providers/folder/config.toml

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_ROOT: &str = "~/studydesk-remote";

#[derive(Deserialize, Default)]
struct FolderConfig {
    root: Option<String>,
}

fn config_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Could not determine config directory")?
        .join("studydesk")
        .join("providers")
        .join("folder")
        .join("config.toml"))
}

/// Resolve the storage root, writing a default config on first use.
pub fn storage_root() -> Result<PathBuf> {
    let path = config_path()?;

    let config: FolderConfig = if path.exists() {
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?
    } else {
        create_default_config(&path)?;
        FolderConfig::default()
    };

    let root = config.root.as_deref().unwrap_or(DEFAULT_ROOT);
    Ok(PathBuf::from(shellexpand::tilde(root).into_owned()))
}

fn create_default_config(path: &std::path::Path) -> Result<()> {
    let contents = format!(
        "\
# studydesk folder provider configuration

# Where mirrored collections are stored:
# root = \"{}\"
",
        DEFAULT_ROOT
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_falls_back_to_the_default_root() {
        let config: FolderConfig = toml::from_str("").unwrap();
        assert!(config.root.is_none());
    }

    #[test]
    fn configured_root_is_kept() {
        let config: FolderConfig = toml::from_str(r#"root = "/srv/desks""#).unwrap();
        assert_eq!(config.root.as_deref(), Some("/srv/desks"));
    }
}
