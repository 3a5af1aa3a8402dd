use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use reqs_common::config::Config;
use reqs_common::error::Result;
use reqs_core::{Catalog, Session};

use crate::manifest::Manifest;

#[derive(Args, Debug)]
pub struct Plan {
    /// Path to the JSON manifest
    pub manifest: PathBuf,
}

impl Plan {
    pub fn run(&self, config: &Config) -> Result<()> {
        let manifest = Manifest::load(&self.manifest)?;
        let catalog = Catalog::new(config)?;
        let mut session = Session::new(&catalog);
        manifest.declare_into(&mut session)?;

        let order = session.plan()?;
        tracing::debug!("Planned {} units", order.len());

        for (idx, action) in order.iter().enumerate() {
            let mut line = format!("{:>3}. {}", idx + 1, action.name().bold());
            if action.is_placeholder() {
                line.push_str(&format!(" {}", "(undeclared)".dimmed()));
            }
            if action.ensure() {
                line.push_str(&format!(" {}", "[ensure]".green()));
            }
            println!("{line}");
        }
        Ok(())
    }
}
