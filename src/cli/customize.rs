//! Copy the bundled templates and style into the document.

use anyhow::Result;
use clap::Args;

use super::CliConfig;
use super::common::print_success;

/// Write editable copies of the converter templates and the stylesheet.
///
/// Existing copies are replaced.
#[derive(Args)]
pub struct CustomizeCommand {}

impl CustomizeCommand {
    /// Writes `<doc_dir>/templates` and `<doc_dir>/<style_dir>`.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let project = config.load_project().await?;
        project.customize()?;
        if !config.quiet {
            let layout = project.layout();
            print_success(&format!("Templates written to {}", layout.templates_dir.display()));
            print_success(&format!("Style written to {}", layout.style_dir.display()));
        }
        Ok(())
    }
}
