// zapgen/src/cli.rs
//! Defines the command-line argument structure using clap.
use clap::{ArgAction, Parser, Subcommand};
use zapgen_common::config::Config;
use zapgen_common::error::Result;

// Module declarations
pub mod generate;
pub mod preview;

use crate::cli::generate::GenerateArgs;
use crate::cli::preview::PreviewArgs;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "zapgen", bin_name = "zapgen")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate uninstall scripts for cataloged applications
    Generate(GenerateArgs),
    /// Print the script (or removal actions) for one application without writing files
    Preview(PreviewArgs),
}

impl Command {
    pub async fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Generate(command) => command.run(config).await,
            Self::Preview(command) => command.run(config).await,
        }
    }
}
