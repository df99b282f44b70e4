//! Error handling for Folio
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`FolioError`]) so pipeline code can decide what is fatal
//! 2. **User-friendly messages** ([`ErrorContext`]) with actionable suggestions for authors
//!
//! # Error Categories
//!
//! - **Configuration**: [`FolioError::ConfigNotFound`], [`FolioError::ConfigParseError`],
//!   [`FolioError::MissingOption`], [`FolioError::TocUnreadable`]
//! - **Environment**: [`FolioError::ExecutableNotFound`], [`FolioError::InputDirNotFound`],
//!   [`FolioError::TocNotFound`]. These are checked before the output tree is touched.
//! - **File system**: [`FolioError::FileSystemError`]
//! - **Templates**: [`FolioError::TemplateRenderError`]
//! - **Conversion**: [`FolioError::ConversionFailed`], [`FolioError::BuildIncomplete`]
//!
//! Pipeline functions return [`anyhow::Result`] and attach `.with_context(..)` as
//! errors travel up. At the top, [`user_friendly_error`] finds the [`FolioError`]
//! in the chain and turns it into an [`ErrorContext`] for display.
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio::core::{FolioError, user_friendly_error};
//!
//! let error = anyhow::Error::from(FolioError::ExecutableNotFound {
//!     name: "pandoc".to_string(),
//! });
//! user_friendly_error(error).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for Folio operations
///
/// Every variant carries plain strings so the error can be cloned into an
/// [`ErrorContext`] without losing information.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FolioError {
    /// A configuration file given explicitly does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was expected to hold the configuration
        path: String,
    },

    /// A configuration file exists but is not valid TOML
    #[error("Invalid configuration file syntax in {file}")]
    ConfigParseError {
        /// Path to the file that failed to parse
        file: String,
        /// Parser message
        reason: String,
    },

    /// A build option consulted by the pipeline has no value in any layer
    #[error("Configuration option '{key}' is not set")]
    MissingOption {
        /// Name of the option
        key: String,
    },

    /// The TOC file exists but cannot be read
    #[error("Can't read table of contents {path}")]
    TocUnreadable {
        /// Path to the TOC file
        path: String,
        /// Underlying I/O message
        reason: String,
    },

    /// The TOC file is missing
    #[error("Couldn't find table of contents. Was expecting: {path}")]
    TocNotFound {
        /// Path where the TOC file was expected
        path: String,
    },

    /// The input directory is missing
    #[error("Couldn't find input folder. Was expecting folder: {path}")]
    InputDirNotFound {
        /// Path where the input directory was expected
        path: String,
    },

    /// A required external program is not on `PATH`
    #[error("Couldn't find '{name}' in current path")]
    ExecutableNotFound {
        /// Program name or path as configured
        name: String,
    },

    /// A file system operation failed while staging or scaffolding
    #[error("File system error: {operation} failed for {path}")]
    FileSystemError {
        /// What was being attempted ("copy style directory", "create chapter", ...)
        operation: String,
        /// Path involved
        path: String,
    },

    /// A chapter file could not be rendered as a template
    #[error("Failed to preprocess {file}")]
    TemplateRenderError {
        /// Chapter file, relative to the staged input directory
        file: String,
        /// Rendered error with location and suggestions
        message: String,
    },

    /// The converter exited non-zero for one output format
    #[error("Converter failed while generating {format}")]
    ConversionFailed {
        /// Output format ("html", "pdf")
        format: String,
        /// Captured standard error of the converter
        stderr: String,
    },

    /// At least one requested format could not be generated
    #[error("Document generation incomplete: {} failed", formats.join(", "))]
    BuildIncomplete {
        /// Formats whose converter invocation failed
        formats: Vec<String>,
    },

    /// `init` would overwrite an existing document
    #[error("Document already exists at {path}")]
    DocumentExists {
        /// Existing input directory
        path: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl FolioError {
    /// Whether this error aborts the run immediately.
    ///
    /// Conversion failures are reported per format and do not stop the next
    /// format from being attempted.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::ConversionFailed { .. })
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Wraps a [`FolioError`] with an optional phase (the outermost context message,
/// e.g. which build phase failed), details, and a suggestion. [`display`]
/// prints everything to stderr in color.
///
/// [`display`]: ErrorContext::display
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying Folio error
    pub error: FolioError,
    /// What was being done when the error occurred
    pub phase: Option<String>,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`FolioError`]
    #[must_use]
    pub const fn new(error: FolioError) -> Self {
        Self {
            error,
            phase: None,
            suggestion: None,
            details: None,
        }
    }

    /// Add the phase or operation that failed
    #[must_use]
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = Some(phase.into());
        self
    }

    /// Add a suggestion for resolving the error
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors
    pub fn display(&self) {
        if let Some(phase) = &self.phase {
            eprintln!("{}: {}", "error".red().bold(), phase);
            eprintln!("{}: {}", "cause".red(), self.error);
        } else {
            eprintln!("{}: {}", "error".red().bold(), self.error);
        }

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(phase) = &self.phase {
            write!(f, "{phase}: ")?;
        }
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Looks for a [`FolioError`] anywhere in the chain. When the outermost message
/// differs from it (a context was attached on the way up), that message becomes
/// the phase line.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let outer = error.to_string();

    // downcast_ref also sees FolioError values attached as context
    let folio_error = error
        .downcast_ref::<FolioError>()
        .or_else(|| error.chain().find_map(|cause| cause.downcast_ref::<FolioError>()));
    if let Some(folio_error) = folio_error {
        let ctx = create_error_context(folio_error.clone());
        return if outer == folio_error.to_string() {
            ctx
        } else {
            ctx.with_phase(outer)
        };
    }

    if let Some(io_error) = error.chain().find_map(|cause| cause.downcast_ref::<std::io::Error>())
    {
        let suggestion = match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                "Check file ownership and permissions of the document directory"
            }
            std::io::ErrorKind::NotFound => {
                "Check that the file or directory exists and the path is correct"
            }
            _ => "Run with --verbose for more details",
        };
        return ErrorContext::new(FolioError::Other {
            message: format_chain(&error),
        })
        .with_suggestion(suggestion);
    }

    ErrorContext::new(FolioError::Other {
        message: format_chain(&error),
    })
}

fn format_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }
    message
}

fn create_error_context(error: FolioError) -> ErrorContext {
    match &error {
        FolioError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Check the path passed with --config or the FOLIO_CONFIG environment variable"),

        FolioError::ConfigParseError { reason, .. } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_details(reason)
                .with_suggestion("Check the TOML syntax. Options belong in [main], template variables in [user]")
        }

        FolioError::MissingOption { key } => {
            let key = key.clone();
            ErrorContext::new(error).with_suggestion(format!(
                "Add '{key} = \"...\"' to the [main] table of folio.toml"
            ))
        }

        FolioError::TocUnreadable { reason, .. } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_details(reason)
                .with_suggestion("Make sure the TOC file is readable UTF-8 text")
        }

        FolioError::TocNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("List one chapter per line in the TOC file, or run 'folio init' to create a sample document"),

        FolioError::InputDirNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'folio init' to create a sample document, or pass --doc-dir to point at an existing one"),

        FolioError::ExecutableNotFound { name } => {
            let suggestion = if name.contains("pandoc") {
                "Install pandoc from https://pandoc.org/installing.html or set pandoc_cmd in folio.toml"
            } else if name == "git" {
                "Install git from https://git-scm.com/ or your package manager"
            } else {
                "Install the program or fix its name in folio.toml"
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        FolioError::FileSystemError { .. } => ErrorContext::new(error)
            .with_suggestion("Check permissions of the document and output directories"),

        FolioError::TemplateRenderError { message, .. } => {
            let message = message.clone();
            ErrorContext::new(error)
                .with_details(message)
                .with_suggestion(
                    "Variables use {{ var }}, comments use {# #}. Available: folio.version, folio.doc_version, folio.md_file and conf.* from the [user] table",
                )
        }

        FolioError::ConversionFailed { stderr, .. } => {
            let stderr = stderr.trim().to_string();
            ErrorContext::new(error)
                .with_details(stderr)
                .with_suggestion("Fix the markup reported by the converter and run 'folio build' again")
        }

        FolioError::BuildIncomplete { .. } => ErrorContext::new(error)
            .with_suggestion("Scroll up for the converter output of each failed format"),

        FolioError::DocumentExists { .. } => ErrorContext::new(error)
            .with_suggestion("Use --force to overwrite the sample document"),

        FolioError::Other { .. } => ErrorContext::new(error),
    }
}
