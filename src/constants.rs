//! Global constants used throughout the Folio codebase.
//!
//! File names, markers and environment variable names that more than one
//! module needs. Configuration *values* (directory names, converter options)
//! live in the bundled `folio.toml` instead, see [`crate::config`].

/// Name of the project configuration file inside the document directory.
pub const CONFIG_FILENAME: &str = "folio.toml";

/// Prefix of a TOC line that is skipped in normal resolution.
pub const TOC_COMMENT_MARKER: char = '#';

/// Prefix of a TOC line that switches resolution to forced-only mode.
pub const TOC_FORCE_MARKER: char = '!';

/// Directory under the document root holding project-level converter templates.
pub const TEMPLATES_DIR: &str = "templates";

/// Hidden directory inside the output tree where bundled templates are materialized.
pub const BUNDLED_TEMPLATES_DIR: &str = ".folio/templates";

/// Name of the repository metadata directory searched for by version resolution.
pub const GIT_METADATA_DIR: &str = ".git";

/// Environment variable overriding the location of the global user config.
pub const ENV_GLOBAL_CONFIG: &str = "FOLIO_CONFIG";

/// Environment variable selecting the document directory.
pub const ENV_DOC_DIR: &str = "FOLIO_DOC_DIR";

/// Environment variable disabling spinners.
pub const ENV_NO_PROGRESS: &str = "FOLIO_NO_PROGRESS";

/// Version of this tool, exposed to chapter templates as `folio.version`.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
