//! Atomic file writes.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use super::dirs::ensure_dir;

/// Writes `content` to `path` atomically.
///
/// The content goes to a temporary file in the same directory, is synced, and
/// is then renamed over the target, so readers see either the old or the new
/// file, never a partial one. Parent directories are created as needed.
///
/// # Examples
///
/// ```rust,no_run
/// use folio::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("out/in/chapter1/chapter1.md"), b"# Chapter 1\n")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    ensure_dir(parent)?;

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;
    temp.persist(path)
        .with_context(|| format!("Failed to replace file: {}", path.display()))?;

    Ok(())
}
