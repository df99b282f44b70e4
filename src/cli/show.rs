//! Open the generated documents.

use anyhow::Result;
use clap::Args;

use super::CliConfig;

/// Open the generated HTML, and the PDF if there is one, in the default viewer.
#[derive(Args)]
pub struct ShowCommand {}

impl ShowCommand {
    /// Hands every generated document to the platform opener.
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        config.load_project().await?.show().await
    }
}
