//! Configuration management for Folio
//!
//! A document's configuration is a flat map from option name to string,
//! resolved once from three layers:
//!
//! 1. **Bundled defaults** - the `folio.toml` shipped inside the binary
//! 2. **Project file** - `<doc_dir>/folio.toml`, optional
//! 3. **Runtime overrides** - values computed by the CLI, such as `doc_dir`
//!
//! Later layers win. The `[user]` tables are kept apart: they never steer the
//! build and only reach chapters as `conf.*` template variables. The global
//! user config ([`GlobalConfig`]) contributes `[user]` entries below the
//! project's own.
//!
//! ```toml
//! [main]
//! out_dir = "build"
//! pandoc_options_html = "--standalone --toc"
//!
//! [user]
//! author = "Jane Doe"
//! ```
//!
//! A [`DocConfig`] is immutable once loaded; the pipeline only reads it.

mod global;
mod parser;

pub use global::GlobalConfig;
pub use parser::{ConfigFile, parse_config, parse_config_str};

use anyhow::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::assets::DEFAULT_CONFIG;
use crate::constants::CONFIG_FILENAME;
use crate::core::FolioError;

/// Where a resolved option got its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSource {
    /// The bundled `folio.toml`
    Default,
    /// The document's own `folio.toml`
    Project,
    /// Set at runtime by the CLI
    Override,
}

impl fmt::Display for OptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Project => "project",
            Self::Override => "override",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
struct ResolvedOption {
    value: String,
    source: OptionSource,
}

/// Resolved configuration of one document.
#[derive(Debug, Clone)]
pub struct DocConfig {
    options: BTreeMap<String, ResolvedOption>,
    user: BTreeMap<String, String>,
    project_file: Option<PathBuf>,
}

impl DocConfig {
    /// Loads the configuration for the document in `doc_dir`.
    ///
    /// `config_path` replaces `<doc_dir>/folio.toml` and must exist. Without it
    /// a missing project file silently leaves the bundled defaults in place.
    pub async fn load(doc_dir: &Path, config_path: Option<&Path>) -> Result<Self> {
        let project_path = match config_path {
            Some(path) if !path.is_file() => {
                return Err(FolioError::ConfigNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let path = doc_dir.join(CONFIG_FILENAME);
                path.is_file().then_some(path)
            }
        };

        let project = match &project_path {
            Some(path) => {
                tracing::debug!("Loading project configuration from {}", path.display());
                Some(parse_config(path).await?)
            }
            None => {
                tracing::debug!("No {CONFIG_FILENAME} in {}, using defaults", doc_dir.display());
                None
            }
        };

        let global = GlobalConfig::load().await?;
        let mut config = Self::from_layers(project, &global)?;
        config.project_file = project_path;
        Ok(config)
    }

    /// Resolves the bundled defaults, an optional project file and the global
    /// user variables into one configuration.
    pub fn from_layers(project: Option<ConfigFile>, global: &GlobalConfig) -> Result<Self> {
        let defaults = parse_config_str(DEFAULT_CONFIG, "bundled folio.toml")?;

        let mut options: BTreeMap<String, ResolvedOption> = defaults
            .main
            .iter()
            .map(|(key, value)| {
                (
                    key.clone(),
                    ResolvedOption {
                        value: stringify(value),
                        source: OptionSource::Default,
                    },
                )
            })
            .collect();

        let mut user: BTreeMap<String, String> = defaults
            .user
            .iter()
            .map(|(key, value)| (key.clone(), stringify(value)))
            .collect();
        user.extend(global.user_items());

        if let Some(project) = project {
            for (key, value) in &project.main {
                options.insert(
                    key.clone(),
                    ResolvedOption {
                        value: stringify(value),
                        source: OptionSource::Project,
                    },
                );
            }
            user.extend(project.user.iter().map(|(key, value)| (key.clone(), stringify(value))));
        }

        Ok(Self {
            options,
            user,
            project_file: None,
        })
    }

    /// Parses project configuration text on top of the bundled defaults.
    ///
    /// The global user config is not consulted.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let project = parse_config_str(content, CONFIG_FILENAME)?;
        Self::from_layers(Some(project), &GlobalConfig::default())
    }

    /// Bundled defaults only.
    pub fn defaults() -> Result<Self> {
        Self::from_layers(None, &GlobalConfig::default())
    }

    /// Sets a runtime override, which wins over every file layer.
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(
            key.into(),
            ResolvedOption {
                value: value.into(),
                source: OptionSource::Override,
            },
        );
        self
    }

    /// Returns an option the pipeline cannot run without.
    pub fn get(&self, key: &str) -> Result<&str> {
        self.options.get(key).map(|option| option.value.as_str()).ok_or_else(|| {
            FolioError::MissingOption {
                key: key.to_string(),
            }
            .into()
        })
    }

    /// Returns an option, or `default` if no layer sets it.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options.get(key).map_or(default, |option| option.value.as_str())
    }

    /// Returns the layer an option was resolved from.
    #[must_use]
    pub fn source(&self, key: &str) -> Option<OptionSource> {
        self.options.get(key).map(|option| option.source)
    }

    /// All resolved options in name order with their origin.
    pub fn options(&self) -> impl Iterator<Item = (&str, &str, OptionSource)> {
        self.options
            .iter()
            .map(|(key, option)| (key.as_str(), option.value.as_str(), option.source))
    }

    /// Template variables from the `[user]` tables.
    #[must_use]
    pub const fn user_items(&self) -> &BTreeMap<String, String> {
        &self.user
    }

    /// The project file that was loaded, if any.
    #[must_use]
    pub fn project_file(&self) -> Option<&Path> {
        self.project_file.as_deref()
    }
}

/// Converts a TOML value into the string the pipeline sees.
///
/// Strings lose their quotes; every other value uses its TOML rendering.
pub(crate) fn stringify(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
