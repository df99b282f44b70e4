//! Staging of sources and assets into the output tree
//!
//! The converter never reads the input directory. A build first copies
//! everything it needs below `out_dir` and renders chapters there, so the
//! author's sources are never modified:
//!
//! ```text
//! out/
//! ├── style/            project style dir, or the bundled one
//! ├── chapter1/img/     per-chapter images, next to the staged input
//! └── in/               full copy of the input tree
//! ```
//!
//! Images are staged twice (inside `out/in/<id>/img` too). Chapters link them
//! as `<id>/img/...` relative to the document, which resolves against
//! `out/` for the HTML output.

use anyhow::{Context, Result};

use crate::assets::{self, STYLE_FILES};
use crate::core::FolioError;
use crate::project::Layout;
use crate::utils::fs::copy_dir;

/// Stages style, chapter images and the input tree, in that order.
///
/// # Errors
///
/// Any copy failure aborts staging with a [`FolioError::FileSystemError`]
/// in the chain.
pub fn stage(layout: &Layout, toc: &[String]) -> Result<()> {
    stage_style(layout)?;
    stage_images(layout, toc)?;
    stage_input(layout)
}

/// Copies the project style directory, or writes the bundled default style.
pub fn stage_style(layout: &Layout) -> Result<()> {
    if layout.style_dir.is_dir() {
        tracing::debug!("Copying style from {}", layout.style_dir.display());
        copy_dir(&layout.style_dir, &layout.staged_style_dir)
    } else {
        tracing::debug!("No project style, using bundled default");
        assets::materialize(STYLE_FILES, &layout.staged_style_dir)
    }
    .with_context(|| FolioError::FileSystemError {
        operation: "stage style directory".to_string(),
        path: layout.staged_style_dir.display().to_string(),
    })
}

/// Copies every existing `<in_dir>/<id>/<img_dir>` to `<out_dir>/<id>/<img_dir>`.
pub fn stage_images(layout: &Layout, toc: &[String]) -> Result<()> {
    for id in toc.iter().filter(|id| !id.trim().is_empty()) {
        let source = layout.image_dir(id);
        if !source.is_dir() {
            continue;
        }

        let target = layout.staged_image_dir(id);
        tracing::debug!("Copying images {} -> {}", source.display(), target.display());
        copy_dir(&source, &target).with_context(|| FolioError::FileSystemError {
            operation: "stage images".to_string(),
            path: source.display().to_string(),
        })?;
    }
    Ok(())
}

/// Copies the whole input tree to `<out_dir>/<in_dir>`.
pub fn stage_input(layout: &Layout) -> Result<()> {
    tracing::debug!(
        "Copying input {} -> {}",
        layout.in_dir.display(),
        layout.staged_in_dir.display()
    );
    copy_dir(&layout.in_dir, &layout.staged_in_dir).with_context(|| {
        FolioError::FileSystemError {
            operation: "stage input directory".to_string(),
            path: layout.in_dir.display().to_string(),
        }
    })
}
