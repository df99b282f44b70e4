//! The document build pipeline
//!
//! A [`Project`] owns the resolved configuration and [`Layout`] of one
//! document and runs every operation on it. A build runs these phases
//! strictly in order, each awaited before the next starts:
//!
//! 1. **Environment check** - converter on `PATH`, input directory and TOC
//!    present. Nothing has been touched yet if this fails.
//! 2. **Clean** - the output directory is removed and recreated.
//! 3. **Table of contents** - chapters to build, see [`crate::toc`].
//! 4. **Staging** - style, images and input tree copied below `out_dir`.
//! 5. **Preprocessing** - staged chapters rendered in place with Tera.
//! 6. **Generation** - one converter run per requested format.
//!
//! A failing phase aborts the build. Converter failures are the exception:
//! every requested format is attempted and the [`BuildReport`] says which
//! ones failed.
//!
//! Concurrent builds of the same document are not coordinated.

mod layout;

pub use layout::Layout;

use anyhow::{Context, Result};
use std::fmt;

use crate::assets::{self, GITIGNORE, SAMPLE_FILES, STYLE_FILES, TEMPLATE_FILES};
use crate::config::DocConfig;
use crate::constants::CONFIG_FILENAME;
use crate::converter::{self, FormatReport, OutputFormat};
use crate::core::FolioError;
use crate::outline::{self, ConfirmRemoval, OutlineReport};
use crate::process::Command;
use crate::utils::fs::{atomic_write, ensure_dir, remove_dir_all};
use crate::utils::platform::{command_exists, get_git_command, get_opener_command};
use crate::{git, staging, templating, toc};

/// A step of the build, reported to the caller as it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    /// Executables and input files are checked
    CheckEnvironment,
    /// The output directory is recreated
    Clean,
    /// The TOC is read
    ResolveToc,
    /// Sources and assets are copied into the output directory
    Stage,
    /// Chapters are rendered as templates
    Preprocess,
    /// The converter runs
    Generate,
}

impl BuildPhase {
    fn failure(self) -> String {
        format!("{self} failed")
    }
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CheckEnvironment => "Checking environment",
            Self::Clean => "Cleaning output directory",
            Self::ResolveToc => "Reading table of contents",
            Self::Stage => "Copying dependencies",
            Self::Preprocess => "Preprocessing chapters",
            Self::Generate => "Generating documents",
        };
        f.write_str(name)
    }
}

/// Result of a build that ran to the end.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Document version label passed to the converter
    pub version: String,
    /// Chapter files handed to the converter, relative to the staged input
    pub files: Vec<String>,
    /// One entry per requested format
    pub formats: Vec<FormatReport>,
}

impl BuildReport {
    /// Formats whose converter run failed.
    #[must_use]
    pub fn failed_formats(&self) -> Vec<OutputFormat> {
        self.formats.iter().filter(|report| !report.is_success()).map(|report| report.format).collect()
    }

    /// Turns converter failures into [`FolioError::BuildIncomplete`].
    pub fn into_result(self) -> Result<Self> {
        let failed = self.failed_formats();
        if failed.is_empty() {
            Ok(self)
        } else {
            Err(FolioError::BuildIncomplete {
                formats: failed.iter().map(ToString::to_string).collect(),
            }
            .into())
        }
    }
}

/// One document: its configuration, its layout, and the operations on it.
#[derive(Debug, Clone)]
pub struct Project {
    config: DocConfig,
    layout: Layout,
    show_progress: bool,
}

impl Project {
    /// Resolves the layout from `config`.
    pub fn new(config: DocConfig) -> Result<Self> {
        let layout = Layout::from_config(&config)?;
        tracing::debug!("Document directory: {}", layout.doc_dir.display());
        Ok(Self {
            config,
            layout,
            show_progress: false,
        })
    }

    /// Shows spinners while the converter runs.
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// The resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &DocConfig {
        &self.config
    }

    /// The resolved directory layout.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Version label of the document, computed fresh.
    pub async fn version(&self) -> String {
        git::resolve_version(&self.layout.doc_dir).await
    }

    /// Verifies that a build can start without touching the filesystem.
    ///
    /// A missing `git` is only a warning; the version then falls back to the
    /// current date.
    pub fn check_env(&self) -> Result<()> {
        let converter = self.config.get("pandoc_cmd")?;
        if !command_exists(converter) {
            return Err(FolioError::ExecutableNotFound {
                name: converter.to_string(),
            }
            .into());
        }

        if !command_exists(get_git_command()) {
            tracing::warn!("git not found, document version will be the current date");
        }

        if !self.layout.in_dir.is_dir() {
            return Err(FolioError::InputDirNotFound {
                path: self.layout.in_dir.display().to_string(),
            }
            .into());
        }

        let toc_path = self.layout.toc_path();
        if !toc_path.is_file() {
            return Err(FolioError::TocNotFound {
                path: toc_path.display().to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Removes the output directory, recreating it empty if `recreate`.
    pub fn clean(&self, recreate: bool) -> Result<()> {
        let out_dir = &self.layout.out_dir;
        tracing::info!("Cleaning {}", out_dir.display());
        remove_dir_all(out_dir)?;
        if recreate {
            ensure_dir(out_dir)?;
        }
        Ok(())
    }

    /// Chapters listed in the TOC.
    pub async fn resolve_toc(&self) -> Result<Vec<String>> {
        toc::resolve_toc(&self.layout.in_dir, &self.layout.toc_filename).await
    }

    /// Runs the whole pipeline.
    pub async fn build(&self, want_pdf: bool) -> Result<BuildReport> {
        self.build_with(want_pdf, |_| {}).await
    }

    /// Runs the whole pipeline, calling `on_phase` as each phase starts.
    pub async fn build_with<F>(&self, want_pdf: bool, mut on_phase: F) -> Result<BuildReport>
    where
        F: FnMut(BuildPhase),
    {
        let mut phase = BuildPhase::CheckEnvironment;
        on_phase(phase);
        self.check_env().with_context(|| phase.failure())?;

        phase = BuildPhase::Clean;
        on_phase(phase);
        self.clean(true).with_context(|| phase.failure())?;

        phase = BuildPhase::ResolveToc;
        on_phase(phase);
        let chapters: Vec<String> = self
            .resolve_toc()
            .await
            .with_context(|| phase.failure())?
            .into_iter()
            .filter(|id| !id.trim().is_empty())
            .collect();
        let files = toc::chapter_files(&chapters, &self.layout.input_ext);
        tracing::debug!("Chapter files: {}", files.join(", "));

        phase = BuildPhase::Stage;
        on_phase(phase);
        staging::stage(&self.layout, &chapters).with_context(|| phase.failure())?;

        phase = BuildPhase::Preprocess;
        on_phase(phase);
        let version = self.version().await;
        tracing::info!("Document version: {version}");
        templating::preprocess(
            &self.layout.staged_in_dir,
            &files,
            &version,
            self.config.user_items(),
        )
        .await
        .with_context(|| phase.failure())?;

        phase = BuildPhase::Generate;
        on_phase(phase);
        let formats = converter::generate(
            &self.layout,
            &self.config,
            &files,
            &version,
            want_pdf,
            self.show_progress,
        )
        .await
        .with_context(|| phase.failure())?;

        Ok(BuildReport {
            version,
            files,
            formats,
        })
    }

    /// Reconciles chapter directories with the TOC.
    pub async fn outline(
        &self,
        allow_delete: bool,
        confirm: &mut dyn ConfirmRemoval,
    ) -> Result<OutlineReport> {
        let toc = self.resolve_toc().await?;
        outline::reconcile(
            &self.layout.in_dir,
            &toc,
            &self.layout.input_ext,
            allow_delete,
            confirm,
        )
    }

    /// Copies the bundled templates and style into the document so they can
    /// be edited, replacing earlier copies.
    pub fn customize(&self) -> Result<()> {
        for (files, dir) in [
            (TEMPLATE_FILES, &self.layout.templates_dir),
            (STYLE_FILES, &self.layout.style_dir),
        ] {
            tracing::info!("Writing {}", dir.display());
            remove_dir_all(dir)?;
            assets::materialize(files, dir).with_context(|| FolioError::FileSystemError {
                operation: "copy bundled files".to_string(),
                path: dir.display().to_string(),
            })?;
        }
        Ok(())
    }

    /// Writes `folio.toml` and a sample document.
    ///
    /// Refuses if the input directory exists, unless `force`; then the sample
    /// files and `folio.toml` are overwritten and other files are left alone.
    pub fn init(&self, force: bool) -> Result<()> {
        let in_dir = &self.layout.in_dir;
        if in_dir.exists() && !force {
            return Err(FolioError::DocumentExists {
                path: in_dir.display().to_string(),
            }
            .into());
        }

        let config_path = self.layout.doc_dir.join(CONFIG_FILENAME);
        if !config_path.exists() || force {
            atomic_write(&config_path, assets::DEFAULT_CONFIG.as_bytes())?;
        }

        assets::materialize(SAMPLE_FILES, in_dir).with_context(|| FolioError::FileSystemError {
            operation: "write sample document".to_string(),
            path: in_dir.display().to_string(),
        })
    }

    /// Puts the document under version control with an initial commit.
    pub async fn init_git(&self) -> Result<()> {
        if !command_exists(get_git_command()) {
            return Err(FolioError::ExecutableNotFound {
                name: get_git_command().to_string(),
            }
            .into());
        }

        let doc_dir = &self.layout.doc_dir;
        let gitignore_path = doc_dir.join(".gitignore");
        atomic_write(&gitignore_path, self.gitignore().as_bytes())?;

        let in_name = self.config.get("in_dir")?;
        git::init_repository(doc_dir, &[".gitignore", in_name, CONFIG_FILENAME]).await
    }

    /// `.gitignore` contents, covering a non-default output directory too.
    fn gitignore(&self) -> String {
        let mut content = GITIGNORE.to_string();
        let out_entry = format!("{}/", self.config.get_or("out_dir", "out"));
        if !content.lines().any(|line| line.trim() == out_entry) {
            if !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(&out_entry);
            content.push('\n');
        }
        content
    }

    /// Generated documents that exist, HTML first.
    #[must_use]
    pub fn outputs(&self) -> Vec<std::path::PathBuf> {
        [OutputFormat::Html, OutputFormat::Pdf]
            .into_iter()
            .map(|format| self.layout.output_file(format.extension()))
            .filter(|path| path.is_file())
            .collect()
    }

    /// Opens the generated documents with the platform's default viewer.
    pub async fn show(&self) -> Result<()> {
        let outputs = self.outputs();
        if outputs.is_empty() {
            return Err(FolioError::Other {
                message: format!(
                    "No generated document in {}. Run 'folio build' first",
                    self.layout.out_dir.display()
                ),
            }
            .into());
        }

        let (program, args) = get_opener_command();
        for path in outputs {
            let output = Command::new(program)
                .args(args.iter().copied())
                .arg(path.display().to_string())
                .execute()
                .await?;
            if !output.success() {
                tracing::warn!("{program} could not open {}: {}", path.display(), output.stderr.trim());
            }
        }
        Ok(())
    }
}
