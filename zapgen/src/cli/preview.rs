// zapgen/src/cli/preview.rs
use std::path::PathBuf;

use clap::Args;
use tracing::warn;
use zapgen_common::config::Config;
use zapgen_common::error::Result;
use zapgen_core::{extract, render};
use zapgen_net::fetch_cask_record;

use crate::cli::generate::{read_catalog_record, require_name};

#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Application name to fetch and preview
    #[arg(long, conflicts_with_all = ["file", "json"], required_unless_present_any = ["file", "json"])]
    pub app: Option<String>,

    /// Local catalog file to resolve and preview
    #[arg(conflicts_with = "json")]
    pub file: Option<PathBuf>,

    /// Literal cask record as JSON, previewed without fetching
    #[arg(long)]
    pub json: Option<String>,

    /// Print the extracted removal actions as pretty JSON instead of the script
    #[arg(long)]
    pub actions: bool,
}

impl PreviewArgs {
    pub async fn run(&self, config: &Config) -> Result<()> {
        let (app_name, record) = if let Some(literal) = &self.json {
            let record = serde_json::from_str(literal)?;
            let name = require_name(&record)?;
            (name, record)
        } else if let Some(file) = &self.file {
            let local = read_catalog_record(file)?;
            let name = require_name(&local)?;
            let record = fetch_cask_record(&name, config).await?;
            (name, record)
        } else {
            // clap guarantees --app is present here
            let name = self.app.clone().unwrap_or_default();
            let record = fetch_cask_record(&name, config).await?;
            (name, record)
        };

        let actions = extract(&record);
        if actions.is_empty() {
            warn!("No removal actions found for '{}'", app_name);
        }

        if self.actions {
            println!("{}", serde_json::to_string_pretty(&actions)?);
        } else {
            print!("{}", render(&app_name, &actions));
        }
        Ok(())
    }
}
