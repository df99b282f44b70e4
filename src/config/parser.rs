//! Parsing of `folio.toml` files.
//!
//! Both the bundled default and a project's own file go through
//! [`parse_config_str`], so they share one error type and one notion of what a
//! value looks like.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::FolioError;

/// The two tables of a `folio.toml` file.
///
/// Values are kept as raw TOML so authors may write `year = 2024` as well as
/// `year = "2024"`; [`super::stringify`] turns them into strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Build-control options
    #[serde(default)]
    pub main: BTreeMap<String, toml::Value>,
    /// Template variables, exposed to chapters as `conf.*`
    #[serde(default)]
    pub user: BTreeMap<String, toml::Value>,
}

/// Parses configuration text. `origin` names the source in error messages.
pub fn parse_config_str(content: &str, origin: &str) -> Result<ConfigFile> {
    toml::from_str(content).map_err(|e| {
        anyhow::Error::from(FolioError::ConfigParseError {
            file: origin.to_string(),
            reason: e.message().to_string(),
        })
    })
}

/// Reads and parses a configuration file.
pub async fn parse_config(path: &Path) -> Result<ConfigFile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config_str(&content, &path.display().to_string())
}
