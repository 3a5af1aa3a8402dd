use clap::Args;
use colored::Colorize;
use reqs_common::config::Config;
use reqs_common::error::Result;
use reqs_common::Availability;
use reqs_core::Catalog;

#[derive(Args, Debug)]
pub struct Check {
    #[arg(required = true)]
    pub names: Vec<String>,
}

impl Check {
    pub fn run(&self, config: &Config) -> Result<()> {
        let catalog = Catalog::new(config)?;
        for name in &self.names {
            if catalog.is_available(name) {
                println!("{} {}", name.bold(), "available".green());
            } else {
                println!("{} {}", name.bold(), "not in catalog".yellow());
            }
        }
        Ok(())
    }
}
