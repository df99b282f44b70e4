//! Folio - multi-chapter documents from markdown fragments
//!
//! Folio builds one document out of many chapter files. A table of contents
//! lists the chapters; each chapter lives in its own directory with an
//! optional image folder. A build stages the chapters into an output tree,
//! renders each one as a Tera template and hands them to pandoc.
//!
//! # Document Layout
//!
//! ```text
//! manual/
//! ├── folio.toml            optional, overrides the bundled defaults
//! ├── in/
//! │   ├── toc.txt           one chapter per line
//! │   ├── intro/
//! │   │   ├── intro.md
//! │   │   └── img/
//! │   └── usage/usage.md
//! ├── style/                optional, replaces the bundled stylesheet
//! ├── templates/            optional, replaces the bundled pandoc templates
//! └── out/                  generated, recreated by every build
//! ```
//!
//! # Modules
//!
//! ## Pipeline
//! - [`project`] - Directory layout and the ordered build phases
//! - [`toc`] - Table of contents parsing, including forced chapters
//! - [`outline`] - Reconciliation of the TOC with chapter directories
//! - [`staging`] - Copying sources, images and style into the output tree
//! - [`templating`] - Rendering chapters with Tera
//! - [`converter`] - pandoc invocations per output format
//!
//! ## Supporting Modules
//! - [`config`] - Layered `folio.toml` configuration
//! - [`git`] - Document version from the enclosing repository
//! - [`process`] - External command execution
//! - [`core`] - Error types and user-facing error reports
//! - [`assets`] - Files bundled into the binary
//! - [`utils`] - File system, platform and progress helpers
//! - [`cli`] - Command-line interface
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Start a new document with three sample chapters
//! folio init
//!
//! # Check that pandoc and the sources are in place
//! folio check --verbose
//!
//! # Generate out/document.html and out/document.pdf
//! folio build --pdf
//!
//! # Create directories for chapters newly added to the TOC
//! folio outline
//! ```

pub mod assets;
pub mod cli;
pub mod config;
pub mod constants;
pub mod converter;
pub mod core;
pub mod git;
pub mod outline;
pub mod process;
pub mod project;
pub mod staging;
pub mod templating;
pub mod toc;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
