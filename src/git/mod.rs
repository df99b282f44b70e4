//! Document versioning through git
//!
//! A document's version label is the date and short hash of the last commit
//! of the repository that encloses it, e.g. `2024-03-05 (1a2b3c4)`. The
//! repository is found by walking up from the document directory to the
//! first ancestor holding a `.git` entry, which lets one repository hold many
//! documents. Without a repository, or when git fails, the label falls back
//! to today's date.
//!
//! The label is computed fresh every time it is asked for.
//!
//! This module also bootstraps a repository for a new document
//! ([`init_repository`]).

mod command_builder;

pub use command_builder::GitCommand;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::constants::GIT_METADATA_DIR;

/// Format passed to `git log` for the version label.
pub const VERSION_LOG_FORMAT: &str = "--format=%cd (%h)";

/// Returns the nearest directory at or above `start` that contains a `.git`
/// entry, checking the filesystem root last.
#[must_use]
pub fn find_repository_root(start: &Path) -> Option<PathBuf> {
    start.ancestors().find(|dir| dir.join(GIT_METADATA_DIR).exists()).map(Path::to_path_buf)
}

/// Today's date in the `YYYY-MM-DD` form used when no commit is available.
#[must_use]
pub fn fallback_version() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Resolves the version label for the document in `doc_dir`.
///
/// Never fails: every problem on the way degrades to [`fallback_version`].
pub async fn resolve_version(doc_dir: &Path) -> String {
    let doc_dir = match std::path::absolute(doc_dir) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("Can't make {} absolute: {e}", doc_dir.display());
            return fallback_version();
        }
    };

    let Some(root) = find_repository_root(&doc_dir) else {
        tracing::warn!(
            "No git repository found above {}, using the current date as version",
            doc_dir.display()
        );
        return fallback_version();
    };

    tracing::debug!("Using git repository at {}", root.display());

    let result = GitCommand::new(root.join(GIT_METADATA_DIR), &doc_dir)
        .args(["log", "-1", VERSION_LOG_FORMAT, "--date=short"])
        .execute()
        .await;

    match result {
        Ok(output) if output.success() && !output.stdout.trim().is_empty() => {
            output.stdout.trim().to_string()
        }
        Ok(output) => {
            tracing::warn!(
                "Can't get version from git, using the current date: {}",
                output.stderr.trim()
            );
            fallback_version()
        }
        Err(e) => {
            tracing::warn!("Can't run git, using the current date: {e:#}");
            fallback_version()
        }
    }
}

/// Creates a repository in `doc_dir` and commits `paths` (relative to it).
///
/// Paths that do not exist are skipped so a document without a project
/// `folio.toml` can still be put under version control.
pub async fn init_repository(doc_dir: &Path, paths: &[&str]) -> Result<()> {
    init_repository_with_env(doc_dir, paths, &[]).await
}

async fn init_repository_with_env(
    doc_dir: &Path,
    paths: &[&str],
    env: &[(&str, &str)],
) -> Result<()> {
    let git_dir = doc_dir.join(GIT_METADATA_DIR);
    let git = || {
        env.iter().fold(GitCommand::new(&git_dir, doc_dir), |command, (key, value)| {
            command.env(*key, *value)
        })
    };

    git()
        .arg("init")
        .execute_success()
        .await
        .with_context(|| format!("Failed to initialize repository in {}", doc_dir.display()))?;

    let existing: Vec<&str> =
        paths.iter().copied().filter(|path| doc_dir.join(path).exists()).collect();
    tracing::debug!("Adding {} to the repository", existing.join(", "));

    git()
        .arg("add")
        .args(existing.iter().copied())
        .execute_success()
        .await
        .context("Failed to add document files")?;

    git()
        .args(["commit", "-m", "Initial commit"])
        .execute_success()
        .await
        .context("Failed to create initial commit")?;

    Ok(())
}
