//! Core types for Folio
//!
//! This module holds the error taxonomy shared by every pipeline phase:
//! - [`FolioError`] - Enumerated error types covering all failure modes
//! - [`ErrorContext`] - User-friendly error wrapper with phase, details and suggestions
//! - [`user_friendly_error`] - Convert any error chain to the display format
//!
//! # Examples
//!
//! ```rust
//! use folio::core::{FolioError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn example_operation() -> Result<String> {
//!     Err(FolioError::TocNotFound { path: "in/toc.txt".to_string() }.into())
//! }
//!
//! if let Err(e) = example_operation() {
//!     let friendly = user_friendly_error(e);
//!     assert!(friendly.suggestion.is_some());
//! }
//! ```

pub mod error;

pub use error::{ErrorContext, FolioError, user_friendly_error};
