//! Remove the output directory.

use anyhow::Result;
use clap::Args;

use super::CliConfig;
use super::common::print_success;

/// Delete the output directory and everything in it.
#[derive(Args)]
pub struct CleanCommand {}

impl CleanCommand {
    /// Removes the output directory; a missing one is fine.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let project = config.load_project().await?;
        project.clean(false)?;
        if !config.quiet {
            print_success(&format!("Removed {}", project.layout().out_dir.display()));
        }
        Ok(())
    }
}
