//! Build the document.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use super::common::{print_error, print_success};

/// Run the whole pipeline: check, clean, stage, preprocess, convert.
#[derive(Args)]
pub struct BuildCommand {
    /// Also generate a PDF
    #[arg(short, long)]
    pdf: bool,
}

impl BuildCommand {
    /// Builds the document and reports each format.
    ///
    /// Fails with `BuildIncomplete` after all formats were attempted if any
    /// converter run failed.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let project = config.load_project().await?;

        let report = project
            .build_with(self.pdf, |phase| {
                if !config.quiet {
                    println!("{}", format!("{phase}...").cyan());
                }
            })
            .await?;

        for format in &report.formats {
            match &format.error {
                None if !config.quiet => {
                    print_success(&format!("Generated {}", format.output_file.display()));
                }
                None => {}
                Some(error) => print_error(error.clone().into()),
            }
        }

        let report = report.into_result()?;
        if !config.quiet {
            print_success(&format!("Done ({})", report.version));
        }
        Ok(())
    }
}
