//! Global user configuration.
//!
//! Authors often want the same template variables in every document (their
//! name, an affiliation). The global file holds a `[user]` table whose entries
//! become `conf.*` variables in every document unless the document's own
//! `folio.toml` defines the same key.
//!
//! # Location
//!
//! - **Unix/macOS**: `~/.folio/config.toml`
//! - **Windows**: `%LOCALAPPDATA%\folio\config.toml`
//! - Overridden by the `FOLIO_CONFIG` environment variable
//!
//! ```toml
//! [user]
//! author = "Jane Doe"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::stringify;
use crate::constants::ENV_GLOBAL_CONFIG;
use crate::core::FolioError;

/// User-wide settings shared by every document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GlobalConfig {
    /// Template variables, lowest precedence below the document's `[user]` table
    #[serde(default)]
    user: BTreeMap<String, toml::Value>,
}

impl GlobalConfig {
    /// Loads the global config from its default location.
    ///
    /// A missing file yields an empty config. A file that exists but does not
    /// parse is an error.
    pub async fn load() -> Result<Self> {
        match Self::default_path() {
            Ok(path) if path.exists() => Self::load_from(&path).await,
            Ok(_) => Ok(Self::default()),
            Err(e) => {
                tracing::debug!("No global config location: {e}");
                Ok(Self::default())
            }
        }
    }

    /// Loads the global config from a specific path.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read global config from {}", path.display()))?;

        toml::from_str(&content).map_err(|e| {
            anyhow::Error::from(FolioError::ConfigParseError {
                file: path.display().to_string(),
                reason: e.to_string(),
            })
        })
    }

    /// Returns the path of the global config file.
    ///
    /// `FOLIO_CONFIG` wins over the platform default.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(ENV_GLOBAL_CONFIG) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("folio")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".folio")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Template variables as strings.
    #[must_use]
    pub fn user_items(&self) -> BTreeMap<String, String> {
        self.user.iter().map(|(k, v)| (k.clone(), stringify(v))).collect()
    }
}
