//! Shared helpers for the Folio integration tests.

// Not every test file uses every helper
#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// The `folio` binary, pointed at `doc_dir`, isolated from the user's global
/// config and environment.
pub fn folio_cmd(doc_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.arg("--doc-dir")
        .arg(doc_dir)
        .env("FOLIO_CONFIG", doc_dir.join("no-global-config.toml"))
        .env("FOLIO_NO_PROGRESS", "1")
        .env("NO_COLOR", "1")
        .env_remove("FOLIO_DOC_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// Whether `git` can be run; tests needing it return early otherwise.
pub fn git_available() -> bool {
    which::which("git").is_ok()
}

/// Commit identity for tests that create commits.
pub const GIT_IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Folio Test"),
    ("GIT_AUTHOR_EMAIL", "folio@example.com"),
    ("GIT_COMMITTER_NAME", "Folio Test"),
    ("GIT_COMMITTER_EMAIL", "folio@example.com"),
];

/// `[main]` table pointing the converter at `program`.
pub fn converter_config(program: &Path, extra: &str) -> String {
    let cmd = toml::Value::String(program.display().to_string());
    format!("[main]\npandoc_cmd = {cmd}\n{extra}")
}
