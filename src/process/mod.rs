//! External command execution
//!
//! Every program Folio starts (the converter, `git`, the file viewer) goes
//! through [`Command`], a small builder over [`tokio::process::Command`]. It
//! always captures both output streams, logs the full command line under the
//! `process` target, and treats a non-zero exit as an ordinary result that
//! the caller classifies with [`CommandOutput::success`]. Only a failure to
//! start the program is an error.
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio::process::Command;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let output = Command::new("pandoc")
//!     .arg("--version")
//!     .current_dir("/tmp")
//!     .execute()
//!     .await?;
//!
//! if output.success() {
//!     println!("{}", output.stdout);
//! }
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

/// Builder for one external command invocation.
#[derive(Debug, Clone)]
pub struct Command {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    env_vars: Vec<(String, String)>,
}

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit status of the process
    pub status: ExitStatus,
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.status.success()
    }
}

impl Command {
    /// Starts building an invocation of `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env_vars: Vec::new(),
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

    /// Runs the command in `dir` instead of the current directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets an environment variable on top of the inherited environment.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.push((key.into(), value.into()));
        self
    }

    /// The program to run.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The arguments collected so far.
    #[must_use]
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Environment overrides in the order they are applied.
    #[must_use]
    pub fn get_envs(&self) -> &[(String, String)] {
        &self.env_vars
    }

    /// The working directory, if one was set.
    #[must_use]
    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// The command line as a single string, for logs and messages.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the command to completion and captures its output.
    ///
    /// # Errors
    ///
    /// Returns an error only if the program could not be started.
    pub async fn execute(self) -> Result<CommandOutput> {
        let command_line = self.display();
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(dir) = &self.current_dir {
            tracing::debug!(
                target: "process",
                "Executing command: {} (in {})",
                command_line,
                dir.display()
            );
            cmd.current_dir(dir);
        } else {
            tracing::debug!(target: "process", "Executing command: {}", command_line);
        }

        for (key, value) in &self.env_vars {
            tracing::debug!(target: "process", "Setting env var: {}={}", key, value);
            cmd.env(key, value);
        }

        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await.with_context(|| format!("Failed to execute {command_line}"))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            if !stdout.is_empty() {
                tracing::debug!(target: "process", "{}", stdout.trim());
            }
        } else {
            tracing::debug!(
                target: "process",
                "Command failed with exit code: {:?}",
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "process", "Error: {}", stderr.trim());
            }
        }

        Ok(CommandOutput {
            status: output.status,
            stdout,
            stderr,
        })
    }
}

/// Runs `program` with `args` in `working_dir`, merging `env` into the
/// inherited environment.
pub async fn run<S: AsRef<str>>(
    program: &str,
    args: &[S],
    working_dir: &Path,
    env: &[(&str, &str)],
) -> Result<CommandOutput> {
    let mut command = Command::new(program)
        .args(args.iter().map(|arg| arg.as_ref().to_string()))
        .current_dir(working_dir);
    for (key, value) in env {
        command = command.env(*key, *value);
    }
    command.execute().await
}
