use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use reqs_common::config::Config;
use reqs_common::error::Result;
use reqs_core::{Catalog, Session};
use tracing::debug;

use crate::manifest::Manifest;
use crate::shell::ShellEnsure;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the JSON manifest
    pub manifest: PathBuf,

    /// Log each unit right before it is activated (also REQS_VERBOSE=1)
    #[arg(long)]
    pub verbose_activation: bool,
}

impl RunArgs {
    pub fn run(&self, config: &Config) -> Result<()> {
        let manifest = Manifest::load(&self.manifest)?;
        let catalog = Catalog::new(config)?;
        let mut session = Session::new(&catalog);
        manifest.declare_into(&mut session)?;

        let verbose = self.verbose_activation || config.verbose;
        let ensurer = ShellEnsure::new(config.ensure_command.clone());
        debug!(
            "Activating {} declared units (verbose={})",
            session.pending(),
            verbose
        );

        session.run_with(verbose, &ensurer)?;
        println!("{}{}", "==> ".bold().blue(), "All units activated.".bold());
        Ok(())
    }
}
