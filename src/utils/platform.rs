//! Platform-specific utilities
//!
//! Folio runs the same on Windows, macOS and Linux. The differences it cares
//! about are small: the git executable name, how to find programs on `PATH`,
//! and which program opens a file in the default viewer.
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio::utils::platform::{command_exists, get_git_command};
//!
//! if !command_exists(get_git_command()) {
//!     eprintln!("git is not installed");
//! }
//! ```

use std::path::PathBuf;

/// Checks if the current platform is Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the platform-specific git executable name.
#[must_use]
pub const fn get_git_command() -> &'static str {
    if is_windows() {
        "git.exe"
    } else {
        "git"
    }
}

/// Checks whether a program can be found on `PATH`.
///
/// Names containing a path separator are checked directly, so a configured
/// converter such as `/opt/pandoc/bin/pandoc` works too.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Resolves a program name to its full path, if it is on `PATH`.
#[must_use]
pub fn find_executable(cmd: &str) -> Option<PathBuf> {
    which::which(cmd).ok()
}

/// Returns the program and leading arguments that open a file in the
/// platform's default application.
///
/// The file path is appended as the last argument by the caller.
#[must_use]
pub fn get_opener_command() -> (&'static str, Vec<&'static str>) {
    if is_windows() {
        // `start` treats the first quoted argument as a window title
        ("cmd", vec!["/C", "start", ""])
    } else if cfg!(target_os = "macos") {
        ("open", Vec::new())
    } else {
        ("xdg-open", Vec::new())
    }
}
