//! Keeps the table of contents and the chapter directories in sync
//!
//! The TOC says which chapters a document has; the input directory says which
//! ones exist. [`reconcile`] repairs the difference in one direction and
//! reports it in the other:
//!
//! - a TOC entry without a directory gets one, with a starter source file
//!   holding a single heading
//! - a directory without a TOC entry is reported as orphaned, and removed only
//!   when deletion is enabled *and* the caller confirms that directory
//!
//! The decision to remove is delegated to a [`ConfirmRemoval`] implementation,
//! so the CLI can prompt while tests answer programmatically.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::core::FolioError;
use crate::utils::fs::{atomic_write, ensure_dir, list_subdirs, remove_dir_all};

/// Decides whether an orphaned chapter directory may be removed.
pub trait ConfirmRemoval {
    /// Returns `true` to remove `dir` and everything below it.
    fn confirm(&mut self, dir: &Path) -> bool;
}

impl<F> ConfirmRemoval for F
where
    F: FnMut(&Path) -> bool,
{
    fn confirm(&mut self, dir: &Path) -> bool {
        self(dir)
    }
}

/// Refuses every removal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

impl ConfirmRemoval for DeclineAll {
    fn confirm(&mut self, _dir: &Path) -> bool {
        false
    }
}

/// What [`reconcile`] found and did, chapter names only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineReport {
    /// TOC entries whose directory and starter file were created
    pub created: Vec<String>,
    /// TOC entries whose directory already existed
    pub present: Vec<String>,
    /// Directories on disk with no TOC entry, in name order
    pub orphaned: Vec<String>,
    /// Orphaned directories that were removed after confirmation
    pub removed: Vec<String>,
}

impl OutlineReport {
    /// Whether the run left the filesystem untouched.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.created.is_empty() && self.removed.is_empty()
    }
}

/// Text of a freshly created chapter source file.
#[must_use]
pub fn starter_content(id: &str) -> String {
    format!("# {id}\n")
}

/// Reconciles the chapter directories under `in_dir` with `toc`.
///
/// Blank identifiers are skipped. Image directories are never created.
///
/// # Errors
///
/// Returns [`FolioError::InputDirNotFound`] if `in_dir` is missing, or a
/// file system error if a directory cannot be created, listed or removed.
pub fn reconcile(
    in_dir: &Path,
    toc: &[String],
    input_ext: &str,
    allow_delete: bool,
    confirm: &mut dyn ConfirmRemoval,
) -> Result<OutlineReport> {
    if !in_dir.is_dir() {
        return Err(FolioError::InputDirNotFound {
            path: in_dir.display().to_string(),
        }
        .into());
    }

    let mut report = OutlineReport::default();

    for id in toc.iter().filter(|id| !id.trim().is_empty()) {
        let chapter_dir = in_dir.join(id);
        if chapter_dir.is_dir() {
            tracing::debug!("Chapter directory {} exists", chapter_dir.display());
            report.present.push(id.clone());
            continue;
        }
        if chapter_dir.exists() {
            return Err(FolioError::Other {
                message: format!(
                    "Can't create chapter '{id}': {} exists and is not a directory",
                    chapter_dir.display()
                ),
            }
            .into());
        }

        tracing::info!("Creating chapter {id}");
        ensure_dir(&chapter_dir).with_context(|| FolioError::FileSystemError {
            operation: "create chapter directory".to_string(),
            path: chapter_dir.display().to_string(),
        })?;
        let source = chapter_dir.join(format!("{id}{input_ext}"));
        atomic_write(&source, starter_content(id).as_bytes())
            .with_context(|| format!("Failed to create chapter file {}", source.display()))?;
        report.created.push(id.clone());
    }

    let declared: HashSet<&str> = toc.iter().map(String::as_str).collect();
    for name in list_subdirs(in_dir)? {
        if declared.contains(name.as_str()) {
            continue;
        }

        tracing::debug!("Directory {name} is not in the table of contents");
        report.orphaned.push(name.clone());

        if !allow_delete {
            continue;
        }
        let dir = in_dir.join(&name);
        if confirm.confirm(&dir) {
            tracing::info!("Removing {}", dir.display());
            remove_dir_all(&dir)?;
            report.removed.push(name);
        }
    }

    Ok(report)
}
