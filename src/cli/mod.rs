//! Command-line interface for Folio
//!
//! Every subcommand works on one document directory, chosen with `--doc-dir`
//! (or `FOLIO_DOC_DIR`) and defaulting to the current directory.
//!
//! # Commands
//!
//! - `init` - Write `folio.toml` and a sample document
//! - `check` - Verify the converter, the input directory and the TOC
//! - `build` - Run the pipeline and generate HTML (and PDF with `--pdf`)
//! - `clean` - Remove the output directory
//! - `outline` - Create chapters listed in the TOC, report unlisted ones
//! - `customize` - Copy the bundled templates and style into the document
//! - `git` - Put the document under version control
//! - `show` - Open the generated documents
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging; `check` also prints the configuration
//! - `--quiet` / `-q` - Errors only, no progress output
//! - `--doc-dir` / `-d` - Document directory
//! - `--config` / `-c` - Configuration file instead of `<doc-dir>/folio.toml`
//! - `--no-progress` - Disable spinners
//!
//! `RUST_LOG` overrides the log level chosen by `--verbose` and `--quiet`.

mod build;
mod check;
mod clean;
pub mod common;
mod customize;
mod git;
mod init;
mod outline;
mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::DocConfig;
use crate::constants::{ENV_DOC_DIR, ENV_NO_PROGRESS};
use crate::project::Project;

/// Settings shared by every subcommand, derived from the global flags.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: &'static str,
    /// `--verbose` was given
    pub verbose: bool,
    /// `--quiet` was given; suppresses progress lines
    pub quiet: bool,
    /// Whether spinners may be drawn
    pub show_progress: bool,
    /// Document directory
    pub doc_dir: PathBuf,
    /// Explicit configuration file
    pub config_path: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "warn",
            verbose: false,
            quiet: false,
            show_progress: true,
            doc_dir: PathBuf::from("."),
            config_path: None,
        }
    }
}

impl CliConfig {
    /// Configuration for a document directory, defaults otherwise.
    #[must_use]
    pub fn for_doc_dir(doc_dir: impl Into<PathBuf>) -> Self {
        Self {
            doc_dir: doc_dir.into(),
            ..Self::default()
        }
    }

    /// Loads the document configuration and resolves its layout.
    pub async fn load_project(&self) -> Result<Project> {
        let config = DocConfig::load(&self.doc_dir, self.config_path.as_deref())
            .await?
            .with_override("doc_dir", self.doc_dir.display().to_string());
        Ok(Project::new(config)?.with_progress(self.show_progress))
    }

    /// Installs the global tracing subscriber. Later calls are no-ops.
    pub fn init_logging(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(self.verbose)
            .try_init();
    }
}

/// Build multi-chapter documents from markdown fragments with pandoc.
#[derive(Parser)]
#[command(
    name = "folio",
    about = "Build multi-chapter documents from markdown fragments",
    version,
    long_about = "Folio assembles the chapters listed in a table of contents into one document \
                  by staging them, rendering them as templates and running pandoc."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Document directory
    #[arg(short, long, global = true, env = ENV_DOC_DIR, default_value = ".")]
    doc_dir: PathBuf,

    /// Configuration file to use instead of <doc-dir>/folio.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable progress spinners
    #[arg(long, global = true, env = ENV_NO_PROGRESS)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create folio.toml and a sample document
    Init(init::InitCommand),

    /// Check that a build can run
    Check(check::CheckCommand),

    /// Build the document
    Build(build::BuildCommand),

    /// Remove the output directory
    Clean(clean::CleanCommand),

    /// Sync chapter directories with the table of contents
    Outline(outline::OutlineCommand),

    /// Copy the bundled templates and style into the document for editing
    Customize(customize::CustomizeCommand),

    /// Put the document under version control
    Git(git::GitCommand),

    /// Open the generated documents
    Show(show::ShowCommand),
}

impl Cli {
    /// Executes the parsed command.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Derives the shared settings from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level,
            verbose: self.verbose,
            quiet: self.quiet,
            show_progress: !self.no_progress && !self.quiet,
            doc_dir: self.doc_dir.clone(),
            config_path: self.config.clone(),
        }
    }

    /// Executes the command with explicit settings.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Init(cmd) => cmd.execute(&config).await,
            Commands::Check(cmd) => cmd.execute(&config).await,
            Commands::Build(cmd) => cmd.execute(&config).await,
            Commands::Clean(cmd) => cmd.execute(&config).await,
            Commands::Outline(cmd) => cmd.execute(&config).await,
            Commands::Customize(cmd) => cmd.execute(&config).await,
            Commands::Git(cmd) => cmd.execute(&config).await,
            Commands::Show(cmd) => cmd.execute(&config).await,
        }
    }
}
