// reqs/src/cli.rs
//! Defines the command-line argument structure using clap.
use clap::{ArgAction, Parser, Subcommand};
use reqs_common::error::Result;
use reqs_common::Config;

pub mod check;
pub mod plan;
pub mod run;
pub mod update;

use crate::cli::check::Check;
use crate::cli::plan::Plan;
use crate::cli::run::RunArgs;
use crate::cli::update::Update;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, name = "reqs", bin_name = "reqs")]
#[command(propagate_version = true)]
pub struct CliArgs {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the activation order of a manifest without running anything
    Plan(Plan),
    /// Resolve a manifest and activate every unit in order
    Run(RunArgs),
    /// Ask the availability catalog about names
    Check(Check),
    /// Refresh the cached availability catalog
    Update(Update),
}

impl Command {
    pub fn run(&self, config: &Config) -> Result<()> {
        match self {
            Self::Plan(command) => command.run(config),
            Self::Run(command) => command.run(config),
            Self::Check(command) => command.run(config),
            Self::Update(command) => command.run(config),
        }
    }

    /// Whether the command reads the catalog and should warn when it is stale.
    pub fn uses_catalog(&self) -> bool {
        matches!(self, Self::Plan(_) | Self::Run(_) | Self::Check(_))
    }
}
