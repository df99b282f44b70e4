//! Converter invocation
//!
//! The rendered chapters are turned into the final document by an external
//! converter, pandoc by default. Folio builds one invocation per output
//! format:
//!
//! ```text
//! <pandoc_cmd> <pandoc_options_<fmt>...> -V VERSION:<label> --template=<path>
//!     <id>/<id>.md... -o <out_dir>/<doc_filename>.<ext>
//! ```
//!
//! run from the staged input directory. A project template at
//! `<doc_dir>/templates/default.<ext>` replaces the bundled one.
//!
//! HTML is always generated. PDF is generated on request after HTML; a failed
//! HTML run does not prevent the PDF attempt. Each attempt yields a
//! [`FormatReport`], and the caller decides how to treat failures.

use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;

use crate::assets::{self, TEMPLATE_FILES};
use crate::config::DocConfig;
use crate::core::FolioError;
use crate::process::Command;
use crate::project::Layout;
use crate::utils::fs::atomic_write;
use crate::utils::progress::ProgressBar;

/// A document format the converter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Standalone HTML
    Html,
    /// PDF through LaTeX
    Pdf,
}

impl OutputFormat {
    /// Extension of the generated file.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Pdf => "pdf",
        }
    }

    /// Configuration key holding the converter options for this format.
    #[must_use]
    pub const fn options_key(self) -> &'static str {
        match self {
            Self::Html => "pandoc_options_html",
            Self::Pdf => "pandoc_options_pdf",
        }
    }

    /// File name of the converter template for this format.
    #[must_use]
    pub const fn template_name(self) -> &'static str {
        match self {
            Self::Html => "default.html",
            Self::Pdf => "default.tex",
        }
    }

    /// Formats to generate, in order.
    #[must_use]
    pub fn requested(want_pdf: bool) -> Vec<Self> {
        if want_pdf {
            vec![Self::Html, Self::Pdf]
        } else {
            vec![Self::Html]
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Outcome of generating one format.
#[derive(Debug, Clone)]
pub struct FormatReport {
    /// The format attempted
    pub format: OutputFormat,
    /// Where the document was (or would have been) written
    pub output_file: PathBuf,
    /// [`FolioError::ConversionFailed`] when the converter exited non-zero
    pub error: Option<FolioError>,
}

impl FormatReport {
    /// Whether the converter succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Splits a converter option string into arguments.
///
/// Whitespace separates arguments. Single or double quotes group text that
/// contains whitespace and are removed; an unterminated quote runs to the
/// end of the string. No other shell syntax is interpreted.
#[must_use]
pub fn split_options(options: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;

    for c in options.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_arg = true;
            }
            None if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            None => {
                current.push(c);
                in_arg = true;
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    args
}

/// Returns the converter template for `format`: the project's own if present,
/// else the bundled one written below `<out_dir>/.folio/templates`.
pub fn template_path(layout: &Layout, format: OutputFormat) -> Result<PathBuf> {
    let name = format.template_name();

    let project_template = layout.templates_dir.join(name);
    if project_template.is_file() {
        tracing::debug!("Using project template {}", project_template.display());
        return Ok(project_template);
    }

    let bundled = assets::find(TEMPLATE_FILES, name).ok_or_else(|| FolioError::Other {
        message: format!("No bundled template named {name}"),
    })?;
    let target = layout.bundled_templates_dir.join(name);
    atomic_write(&target, bundled.contents).with_context(|| FolioError::FileSystemError {
        operation: "write bundled template".to_string(),
        path: target.display().to_string(),
    })?;
    tracing::debug!("Using bundled template {}", target.display());
    Ok(target)
}

/// Builds the converter command for one format.
pub fn build_command(
    layout: &Layout,
    config: &DocConfig,
    format: OutputFormat,
    files: &[String],
    version: &str,
) -> Result<Command> {
    let template = template_path(layout, format)?;

    Ok(Command::new(config.get("pandoc_cmd")?)
        .args(split_options(config.get(format.options_key())?))
        .arg("-V")
        .arg(format!("VERSION:{version}"))
        .arg(format!("--template={}", template.display()))
        .args(files.iter().cloned())
        .arg("-o")
        .arg(layout.output_file(format.extension()).display().to_string())
        .current_dir(&layout.staged_in_dir))
}

/// Generates HTML, then PDF if `want_pdf`, and reports on each.
///
/// # Errors
///
/// Only problems that make every format impossible are errors: a missing
/// option, an unwritable template, or a converter that cannot be started.
/// A converter exiting non-zero is reported in the [`FormatReport`].
pub async fn generate(
    layout: &Layout,
    config: &DocConfig,
    files: &[String],
    version: &str,
    want_pdf: bool,
    show_progress: bool,
) -> Result<Vec<FormatReport>> {
    let mut reports = Vec::new();

    for format in OutputFormat::requested(want_pdf) {
        let command = build_command(layout, config, format, files, version)?;
        let output_file = layout.output_file(format.extension());
        tracing::info!("Generating {format} with {}", command.program());

        let spinner = if show_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        spinner.set_message(format!("Generating {format}"));
        let result = command.execute().await;
        spinner.finish_and_clear();

        let output = result.with_context(|| format!("Failed to run converter for {format}"))?;
        let error = if output.success() {
            None
        } else {
            tracing::debug!("Converter failed for {format}: {}", output.stderr.trim());
            Some(FolioError::ConversionFailed {
                format: format.to_string(),
                stderr: output.stderr,
            })
        };

        reports.push(FormatReport {
            format,
            output_file,
            error,
        });
    }

    Ok(reports)
}
