//! Put the document under version control.

use anyhow::Result;
use clap::Args;

use super::CliConfig;
use super::common::print_success;

/// Initialize a git repository in the document directory and commit the
/// sources. The output directory is ignored.
#[derive(Args)]
pub struct GitCommand {}

impl GitCommand {
    /// Runs `git init`, writes `.gitignore` and creates the first commit.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let project = config.load_project().await?;
        project.init_git().await?;
        if !config.quiet {
            print_success(&format!(
                "Initialized repository in {}",
                project.layout().doc_dir.display()
            ));
        }
        Ok(())
    }
}
