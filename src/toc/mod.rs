//! Table of contents resolution
//!
//! The TOC file lists one chapter identifier per line. Each identifier names
//! both the chapter's directory and its source file stem, so `intro` means
//! `<in_dir>/intro/intro.md`.
//!
//! ```text
//! # lines starting with '#' are skipped
//! intro
//! setup
//! usage
//! ```
//!
//! Prefixing lines with `!` builds only those chapters, which is handy while
//! working on one part of a long document:
//!
//! ```text
//! intro
//! !setup
//! usage
//! ```
//!
//! resolves to just `["setup"]`.

use anyhow::Result;
use std::io::ErrorKind;
use std::path::Path;

use crate::constants::{TOC_COMMENT_MARKER, TOC_FORCE_MARKER};
use crate::core::FolioError;

/// Parses TOC text into the ordered list of chapter identifiers to build.
///
/// If any line starts with `!`, the result is exactly those lines, marker
/// stripped, in file order; every other line is ignored, comments included.
/// Otherwise the result is every line not starting with `#`. Lines are not
/// trimmed, and blank lines are kept.
#[must_use]
pub fn parse_toc(content: &str) -> Vec<String> {
    let lines: Vec<&str> = content.lines().collect();

    let forced: Vec<String> = lines
        .iter()
        .filter_map(|line| line.strip_prefix(TOC_FORCE_MARKER))
        .map(str::to_string)
        .collect();
    if !forced.is_empty() {
        tracing::debug!("TOC has {} forced entries, ignoring the rest", forced.len());
        return forced;
    }

    lines
        .into_iter()
        .filter(|line| !line.starts_with(TOC_COMMENT_MARKER))
        .map(str::to_string)
        .collect()
}

/// Reads `<in_dir>/<toc_filename>` and parses it with [`parse_toc`].
///
/// # Errors
///
/// [`FolioError::TocNotFound`] if the file is missing,
/// [`FolioError::TocUnreadable`] if it cannot be read as UTF-8 text.
pub async fn resolve_toc(in_dir: &Path, toc_filename: &str) -> Result<Vec<String>> {
    let path = in_dir.join(toc_filename);
    tracing::debug!("Reading table of contents from {}", path.display());

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(FolioError::TocNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        Err(e) => {
            return Err(FolioError::TocUnreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into());
        }
    };

    Ok(parse_toc(&content))
}

/// Maps chapter identifiers to source paths relative to the input directory:
/// `<id>/<id><input_ext>`, in TOC order.
#[must_use]
pub fn chapter_files(toc: &[String], input_ext: &str) -> Vec<String> {
    toc.iter().map(|id| format!("{id}/{id}{input_ext}")).collect()
}
