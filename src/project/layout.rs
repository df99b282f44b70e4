//! Resolved directory layout of a document.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::DocConfig;
use crate::constants::{BUNDLED_TEMPLATES_DIR, TEMPLATES_DIR};

/// Every path the pipeline touches, resolved once from the configuration.
///
/// Directory options (`in_dir`, `out_dir`, `style_dir`) are relative to the
/// document directory. The staged copies keep the same names below `out_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Absolute document directory
    pub doc_dir: PathBuf,
    /// Authoritative chapter sources
    pub in_dir: PathBuf,
    /// Build output, recreated by every build
    pub out_dir: PathBuf,
    /// Project style directory, may not exist
    pub style_dir: PathBuf,
    /// Project converter templates, may not exist
    pub templates_dir: PathBuf,
    /// Staged, rendered copy of `in_dir`; the converter runs here
    pub staged_in_dir: PathBuf,
    /// Staged style directory
    pub staged_style_dir: PathBuf,
    /// Where bundled converter templates are written when used
    pub bundled_templates_dir: PathBuf,
    /// Name of a chapter's image subdirectory
    pub img_dir: String,
    /// Extension of chapter sources, dot included
    pub input_ext: String,
    /// TOC file name inside `in_dir`
    pub toc_filename: String,
    /// Output file stem
    pub doc_filename: String,
}

impl Layout {
    /// Resolves the layout from `config`. `doc_dir` defaults to the current
    /// directory.
    pub fn from_config(config: &DocConfig) -> Result<Self> {
        let doc_dir = Path::new(config.get_or("doc_dir", "."));
        let doc_dir = std::path::absolute(doc_dir)
            .with_context(|| format!("Failed to resolve document directory {}", doc_dir.display()))?;

        let in_name = config.get("in_dir")?;
        let out_dir = doc_dir.join(config.get("out_dir")?);
        let style_name = config.get("style_dir")?;

        Ok(Self {
            in_dir: doc_dir.join(in_name),
            style_dir: doc_dir.join(style_name),
            templates_dir: doc_dir.join(TEMPLATES_DIR),
            staged_in_dir: out_dir.join(in_name),
            staged_style_dir: out_dir.join(style_name),
            bundled_templates_dir: out_dir.join(BUNDLED_TEMPLATES_DIR),
            img_dir: config.get("img_dir")?.to_string(),
            input_ext: config.get("input_ext")?.to_string(),
            toc_filename: config.get("toc_filename")?.to_string(),
            doc_filename: config.get("doc_filename")?.to_string(),
            out_dir,
            doc_dir,
        })
    }

    /// The TOC file.
    #[must_use]
    pub fn toc_path(&self) -> PathBuf {
        self.in_dir.join(&self.toc_filename)
    }

    /// A chapter's image directory in the input tree.
    #[must_use]
    pub fn image_dir(&self, id: &str) -> PathBuf {
        self.in_dir.join(id).join(&self.img_dir)
    }

    /// Where a chapter's images are staged: `<out_dir>/<id>/<img_dir>`.
    #[must_use]
    pub fn staged_image_dir(&self, id: &str) -> PathBuf {
        self.out_dir.join(id).join(&self.img_dir)
    }

    /// The generated document for an output extension.
    #[must_use]
    pub fn output_file(&self, extension: &str) -> PathBuf {
        self.out_dir.join(format!("{}.{extension}", self.doc_filename))
    }
}
