//! Contains the logic for the `update` command.
use reqs_common::config::Config;
use reqs_common::error::Result;
use reqs_core::Catalog;

#[derive(clap::Args, Debug)]
pub struct Update;

impl Update {
    pub fn run(&self, config: &Config) -> Result<()> {
        tracing::debug!("Running manual catalog update from {}", config.catalog_url);
        println!("Updating availability catalog");

        let mut catalog = Catalog::new(config)?;
        match catalog.refresh() {
            Ok(count) => {
                tracing::debug!("Cached {} catalog entries", count);
                println!("Cached {count} catalog entries");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to fetch/store catalog: {}", e);
                Err(e)
            }
        }
    }
}
