//! File system utilities
//!
//! Thin wrappers over `std::fs`, `walkdir` and `tempfile` that attach the
//! path involved to every error.
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio::utils::fs::{copy_dir, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("out"))?;
//! copy_dir(Path::new("in"), Path::new("out/in"))?;
//! # Ok(())
//! # }
//! ```

pub mod atomic;
pub mod dirs;

pub use atomic::atomic_write;
pub use dirs::{copy_dir, ensure_dir, list_subdirs, remove_dir_all};
