//! Files bundled into the binary
//!
//! The default configuration, converter templates, stylesheet and the sample
//! document ship inside the executable so a document directory needs nothing
//! but chapters to build. [`materialize`] writes a group of them to disk when
//! a pipeline phase needs real files (the converter reads templates by path).

use anyhow::{Context, Result};
use std::path::Path;

use crate::utils::fs::{atomic_write, ensure_dir};

/// A file embedded at compile time, addressed by its path relative to the
/// group's root directory.
#[derive(Debug, Clone, Copy)]
pub struct BundledFile {
    /// Relative path below the group root, `/`-separated
    pub path: &'static str,
    /// File contents
    pub contents: &'static [u8],
}

macro_rules! bundled {
    ($path:literal, $source:literal) => {
        BundledFile {
            path: $path,
            contents: include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/", $source)),
        }
    };
}

/// Default `folio.toml`, also used as the lowest configuration layer.
pub const DEFAULT_CONFIG: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/folio.toml"));

/// `.gitignore` written by `folio git`.
pub const GITIGNORE: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/resources/gitignore"));

/// Default style directory contents.
pub const STYLE_FILES: &[BundledFile] = &[
    bundled!("default.css", "style/default.css"),
    bundled!("default.js", "style/default.js"),
];

/// Default converter templates, one per output format.
pub const TEMPLATE_FILES: &[BundledFile] = &[
    bundled!("default.html", "templates/default.html"),
    bundled!("default.tex", "templates/default.tex"),
];

/// Sample input directory written by `folio init`.
pub const SAMPLE_FILES: &[BundledFile] = &[
    bundled!("toc.txt", "sample/toc.txt"),
    bundled!("chapter1/chapter1.md", "sample/chapter1/chapter1.md"),
    bundled!("chapter1/img/sample.svg", "sample/chapter1/img/sample.svg"),
    bundled!("chapter2/chapter2.md", "sample/chapter2/chapter2.md"),
    bundled!("chapter3/chapter3.md", "sample/chapter3/chapter3.md"),
];

/// Writes every file of a bundled group below `dest`, creating directories.
pub fn materialize(files: &[BundledFile], dest: &Path) -> Result<()> {
    ensure_dir(dest)?;
    for file in files {
        let target = dest.join(file.path);
        tracing::debug!("Writing bundled file {}", target.display());
        atomic_write(&target, file.contents)
            .with_context(|| format!("Failed to write bundled file {}", target.display()))?;
    }
    Ok(())
}

/// Looks up a bundled file by its relative path.
#[must_use]
pub fn find(files: &[BundledFile], path: &str) -> Option<BundledFile> {
    files.iter().copied().find(|file| file.path == path)
}
