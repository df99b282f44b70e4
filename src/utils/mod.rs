//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - File system operations: directory copies, removal, atomic writes
//! - [`platform`] - Executable lookup and platform-specific program names
//! - [`progress`] - Spinners for long-running converter invocations

pub mod fs;
pub mod platform;
pub mod progress;

pub use fs::{atomic_write, copy_dir, ensure_dir, remove_dir_all};
pub use platform::{command_exists, get_git_command, is_windows};
pub use progress::ProgressBar;
