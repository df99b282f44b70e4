//! Integration test suite for Folio
//!
//! End-to-end tests of the build pipeline and the command-line interface.
//! Builds use a shell-script converter in place of pandoc, so most of these
//! tests only run on unix.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **build**: The pipeline end to end, converter arguments, failures
//! - **outline**: Chapter directory reconciliation
//! - **version**: Version labels with and without a repository
//! - **cli**: The `folio` binary and its subcommands

#[path = "../common/mod.rs"]
mod common;

mod build;
mod cli;
mod outline;
mod version;
