//! Chapter preprocessing with Tera
//!
//! Before conversion every staged chapter is rendered as a [Tera] template and
//! overwritten in place. Chapters can refer to build metadata and to the
//! author's own variables:
//!
//! | Variable            | Value                                         |
//! |---------------------|-----------------------------------------------|
//! | `folio.version`     | version of this tool                          |
//! | `folio.doc_version` | document version, see [`crate::git`]         |
//! | `folio.md_file`     | the chapter's path, e.g. `intro/intro.md`     |
//! | `conf.<key>`        | entries of the `[user]` config table          |
//!
//! ```markdown
//! # Release notes
//!
//! Version {{ folio.doc_version }}, compiled by {{ conf.author }}.
//! ```
//!
//! Every text file of the staged input tree is loaded as a template under its
//! relative path, so chapters can share fragments:
//!
//! ```markdown
//! {% include "shared/disclaimer.md" %}
//! ```
//!
//! `import` and `extends` work the same way. Includes see the staged files as
//! they were before any chapter was rendered.
//!
//! Rendering a chapter that uses an unknown variable fails the build and names
//! the chapter; the error lists similarly named variables.
//!
//! [Tera]: https://keats.github.io/tera/

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::TemplateSet;

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tera::Context as TeraContext;
use walkdir::WalkDir;

use crate::constants::TOOL_VERSION;
use crate::core::FolioError;

/// Builds the render context for one chapter.
#[must_use]
pub fn build_context(doc_version: &str, md_file: &str, user: &BTreeMap<String, String>) -> TeraContext {
    let mut context = TeraContext::new();
    context.insert(
        "folio",
        &serde_json::json!({
            "version": TOOL_VERSION,
            "doc_version": doc_version,
            "md_file": md_file,
        }),
    );
    context.insert("conf", user);
    context
}

/// Loads every UTF-8 file below `root` as a template named by its relative
/// path with `/` separators. Other files, such as images, are skipped.
pub fn load_tree(root: &Path) -> Result<TemplateSet> {
    let mut sources = Vec::new();

    for entry in WalkDir::new(root).min_depth(1).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to read directory: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let bytes = std::fs::read(entry.path())
            .with_context(|| format!("Failed to read {}", entry.path().display()))?;
        let Ok(content) = String::from_utf8(bytes) else {
            tracing::trace!("Skipping binary file {}", entry.path().display());
            continue;
        };

        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("Path escaped template root: {}", entry.path().display()))?;
        let name = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        sources.push((name, content));
    }

    tracing::debug!("Loaded {} template files from {}", sources.len(), root.display());
    Ok(TemplateSet::from_sources(sources))
}

/// Renders every file of `files` in place below `staged_in_dir`.
///
/// Files are processed in order; the first failure aborts with a
/// [`FolioError::TemplateRenderError`] naming the file.
pub async fn preprocess(
    staged_in_dir: &Path,
    files: &[String],
    doc_version: &str,
    user: &BTreeMap<String, String>,
) -> Result<()> {
    let templates = load_tree(staged_in_dir)?;

    for file in files {
        let path = staged_in_dir.join(file);
        tracing::debug!("Preprocessing {}", path.display());

        if !templates.contains(file) {
            return Err(FolioError::FileSystemError {
                operation: "read chapter".to_string(),
                path: path.display().to_string(),
            }
            .into());
        }

        let context = build_context(doc_version, file, user);
        let rendered = templates.render(file, &context).map_err(|e| {
            tracing::debug!("Rendering {file} failed: {e}");
            FolioError::TemplateRenderError {
                file: file.clone(),
                message: e.format_with_context(),
            }
        })?;

        tokio::fs::write(&path, rendered)
            .await
            .with_context(|| format!("Failed to write chapter {}", path.display()))?;
    }
    Ok(())
}
