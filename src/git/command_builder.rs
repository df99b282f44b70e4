//! Builder for `git` invocations pinned to one repository
//!
//! Folio never relies on git discovering the repository from the current
//! directory. Every call names the metadata directory and the work tree
//! explicitly through `GIT_DIR` and `GIT_WORK_TREE`, so a document nested deep
//! inside a larger checkout resolves against the right repository.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::core::FolioError;
use crate::process::{Command, CommandOutput};
use crate::utils::platform::get_git_command;

/// A `git` command with an explicit repository and work tree.
#[derive(Debug, Clone)]
pub struct GitCommand {
    args: Vec<String>,
    env_vars: Vec<(String, String)>,
    git_dir: PathBuf,
    work_tree: PathBuf,
}

impl GitCommand {
    /// Targets the repository whose metadata lives in `git_dir`, operating on
    /// the files below `work_tree`.
    pub fn new(git_dir: impl AsRef<Path>, work_tree: impl AsRef<Path>) -> Self {
        Self {
            args: Vec::new(),
            env_vars: Vec::new(),
            git_dir: git_dir.as_ref().to_path_buf(),
            work_tree: work_tree.as_ref().to_path_buf(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets an extra environment variable. `GIT_DIR` and `GIT_WORK_TREE`
    /// cannot be overridden this way.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    fn into_command(self) -> Command {
        let mut command = Command::new(get_git_command()).args(self.args);
        for (key, value) in self.env_vars {
            command = command.env(key, value);
        }
        command
            .env("GIT_DIR", self.git_dir.display().to_string())
            .env("GIT_WORK_TREE", self.work_tree.display().to_string())
            .current_dir(&self.work_tree)
    }

    /// Runs the command; a non-zero exit is returned, not raised.
    pub async fn execute(self) -> Result<CommandOutput> {
        self.into_command().execute().await
    }

    /// Runs the command and fails unless git exits with status zero.
    pub async fn execute_success(self) -> Result<CommandOutput> {
        let operation = self.args.first().cloned().unwrap_or_else(|| "git".to_string());
        let output = self.execute().await?;
        if output.success() {
            Ok(output)
        } else {
            Err(FolioError::Other {
                message: format!("git {operation} failed: {}", output.stderr.trim()),
            }
            .into())
        }
    }
}
