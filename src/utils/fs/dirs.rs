//! Directory operations for creating, copying, listing and removing directories.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// # Returns
///
/// - `Ok(())` if the directory exists or was successfully created
/// - `Err` if the path exists but is not a directory, or creation fails
///
/// # Examples
///
/// ```rust,no_run
/// use folio::utils::fs::ensure_dir;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// ensure_dir(Path::new("out/chapter1/img"))?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_context(|| {
            format!(
                "Failed to create directory: {}\n\nCheck directory permissions and path validity",
                path.display()
            )
        })?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Recursively copies a directory and all its contents to a new location.
///
/// The destination is created if needed and the relative structure below
/// `src` is reproduced below `dst`. Symlinks are followed: the copy holds the
/// contents of their targets. A dangling symlink is an error. Existing files in
/// the destination are overwritten.
///
/// A destination inside the source tree is skipped while walking, so
/// `copy_dir("doc", "doc/out/doc")` terminates.
///
/// # Examples
///
/// ```rust,no_run
/// use folio::utils::fs::copy_dir;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// copy_dir(Path::new("doc/in"), Path::new("doc/out/in"))?;
/// # Ok(())
/// # }
/// ```
pub fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    ensure_dir(dst)?;

    let walker = WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| entry.path() != dst);

    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("Path escaped copy root: {}", entry.path().display()))?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            ensure_dir(&target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy file from {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Recursively removes a directory and all its contents.
///
/// Missing directories are not an error.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Lists the names of the immediate subdirectories of `path`, sorted.
pub fn list_subdirs(path: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in
        fs::read_dir(path).with_context(|| format!("Failed to read directory: {}", path.display()))?
    {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
