//! Check that a build can run.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use super::CliConfig;
use super::common::print_success;
use crate::project::Project;
use crate::utils::platform::{find_executable, get_git_command};

/// Verify the converter, git, the input directory and the TOC.
///
/// With `--verbose`, first print every resolved option with its origin and the
/// current document version, so the report is there when a check fails.
#[derive(Args)]
pub struct CheckCommand {}

impl CheckCommand {
    /// Runs the environment check.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let project = config.load_project().await?;

        if config.verbose {
            print_report(&project).await?;
        }

        project.check_env().context("Environment check failed")?;

        if !config.quiet {
            print_success("Environment OK");
        }
        Ok(())
    }
}

/// Prints executables, resolved options with their origin, template
/// variables and the document version.
async fn print_report(project: &Project) -> Result<()> {
    let doc_config = project.config();
    println!("{}", "Executables:".cyan());
    for name in [doc_config.get("pandoc_cmd")?, get_git_command()] {
        match find_executable(name) {
            Some(path) => println!("  {name}: {}", path.display()),
            None => println!("  {name}: {}", "not found".yellow()),
        }
    }

    println!("{}", "Configuration:".cyan());
    match doc_config.project_file() {
        Some(path) => println!("  file: {}", path.display()),
        None => println!("  file: {}", "none, using defaults".dimmed()),
    }
    for (key, value, source) in doc_config.options() {
        println!("  {key} = {value:?} {}", format!("({source})").dimmed());
    }

    if !doc_config.user_items().is_empty() {
        println!("{}", "Template variables:".cyan());
        for (key, value) in doc_config.user_items() {
            println!("  conf.{key} = {value:?}");
        }
    }

    println!("{} {}", "Document version:".cyan(), project.version().await);

    Ok(())
}
