//! Helpers shared by the subcommands.

use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use crate::core::user_friendly_error;
use crate::outline::ConfirmRemoval;

/// Asks on the terminal before a directory is removed.
///
/// When stdin is not a terminal (CI, pipes) every removal is declined.
#[derive(Debug, Default)]
pub struct PromptRemoval;

impl ConfirmRemoval for PromptRemoval {
    fn confirm(&mut self, dir: &Path) -> bool {
        if !io::stdin().is_terminal() {
            tracing::debug!("stdin is not a terminal, keeping {}", dir.display());
            return false;
        }

        print!("Remove {}? (y/N): ", dir.display());
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(e) => {
                tracing::debug!("Failed to read answer: {e}");
                false
            }
        }
    }
}

/// Only an explicit yes counts.
pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints a success line.
pub(crate) fn print_success(message: &str) {
    println!("{} {message}", "✓".green());
}

/// Prints a non-fatal error in the same format as fatal ones.
pub(crate) fn print_error(error: anyhow::Error) {
    user_friendly_error(error).display();
}
