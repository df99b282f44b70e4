//! Spinners for long-running converter invocations
//!
//! A PDF build through LaTeX can take a while; a spinner shows the run is
//! alive. Spinners are hidden when `FOLIO_NO_PROGRESS` is set, when stderr is
//! not a terminal, or when the CLI runs with `--quiet`.
//!
//! # Examples
//!
//! ```rust,no_run
//! use folio::utils::progress::ProgressBar;
//!
//! let spinner = ProgressBar::new_spinner();
//! spinner.set_message("Generating html");
//! // run the converter
//! spinner.finish_and_clear();
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::io::IsTerminal;
use std::time::Duration;

use crate::constants::ENV_NO_PROGRESS;

fn is_progress_disabled() -> bool {
    std::env::var(ENV_NO_PROGRESS).is_ok() || !std::io::stderr().is_terminal()
}

/// A spinner with consistent styling that hides itself in non-interactive runs.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates a spinner for work of unknown length.
    #[must_use]
    pub fn new_spinner() -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            let bar = IndicatifBar::new_spinner();
            if let Ok(style) = spinner_style() {
                bar.set_style(style);
            }
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self {
            inner: bar,
        }
    }

    /// Creates a spinner that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    /// Sets the message shown next to the spinner.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Stops the spinner and removes it from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }

    /// Returns whether the spinner draws anything.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }
}

fn spinner_style() -> Result<IndicatifStyle, indicatif::style::TemplateError> {
    Ok(IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")?
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]))
}
