//! Create a new document.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use super::common::print_success;

/// Write `folio.toml` and a sample document with three chapters.
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite the sample files and folio.toml if they exist
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    /// Writes the configuration and the sample input directory.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        crate::utils::fs::ensure_dir(&config.doc_dir)?;
        let project = config.load_project().await?;
        project.init(self.force)?;

        if !config.quiet {
            let layout = project.layout();
            print_success(&format!("Created sample document in {}", layout.in_dir.display()));
            println!("\n{}", "Next steps:".cyan());
            println!("  List your chapters in {}", layout.toc_path().display());
            println!("  Run {} to create their directories", "folio outline".bright_white());
            println!("  Run {} to generate the document", "folio build".bright_white());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_creates_document() {
        let temp = TempDir::new().unwrap();
        let doc_dir = temp.path().join("manual");
        let config = CliConfig {
            quiet: true,
            ..CliConfig::for_doc_dir(&doc_dir)
        };

        InitCommand {
            force: false,
        }
        .execute(&config)
        .await
        .unwrap();

        assert!(doc_dir.join("folio.toml").is_file());
        assert!(doc_dir.join("in/chapter2/chapter2.md").is_file());
    }

    #[tokio::test]
    async fn test_init_twice_needs_force() {
        let temp = TempDir::new().unwrap();
        let config = CliConfig {
            quiet: true,
            ..CliConfig::for_doc_dir(temp.path())
        };

        InitCommand {
            force: false,
        }
        .execute(&config)
        .await
        .unwrap();

        let second = InitCommand {
            force: false,
        }
        .execute(&config)
        .await;
        assert!(second.is_err());

        InitCommand {
            force: true,
        }
        .execute(&config)
        .await
        .unwrap();
    }
}
