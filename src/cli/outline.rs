//! Sync chapter directories with the table of contents.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use super::common::{PromptRemoval, print_success};

/// Create a directory and starter file for every chapter in the TOC, and list
/// directories that are not in it.
#[derive(Args)]
pub struct OutlineCommand {
    /// Offer to delete directories missing from the TOC, asking for each
    #[arg(short = 'D', long)]
    delete: bool,
}

impl OutlineCommand {
    /// Reconciles the input directory with the TOC and prints what changed.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let project = config.load_project().await?;
        let report = project.outline(self.delete, &mut PromptRemoval).await?;

        for id in &report.present {
            println!("{} {id}", "exists".green());
        }
        for id in &report.created {
            println!("{} {id}", "created".green());
        }
        for id in &report.orphaned {
            if report.removed.contains(id) {
                println!("{} {id}", "removed".red());
            } else {
                println!("{} {id} is not in the table of contents", "unlisted".yellow());
            }
        }

        if !config.quiet && report.is_unchanged() && report.orphaned.is_empty() {
            print_success("Outline matches the table of contents");
        }
        Ok(())
    }
}
