// reqs/src/manifest.rs
//! JSON manifest of units handed to the resolver.
use std::fs;
use std::path::Path;

use reqs_common::error::{ReqsError, Result};
use reqs_core::Session;
use serde::Deserialize;
use tracing::debug;

use crate::shell;

#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub units: Vec<UnitSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnitSpec {
    pub name: String,
    #[serde(default)]
    pub requires: Vec<String>,
    /// Shell command activating the unit.
    #[serde(default)]
    pub run: Option<String>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading manifest from {}", path.display());
        let raw = fs::read_to_string(path).map_err(|e| {
            ReqsError::NotFound(format!("Cannot read manifest {}: {e}", path.display()))
        })?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(raw)?;
        debug!("Manifest declares {} units", manifest.units.len());
        Ok(manifest)
    }

    /// Declares every unit on `session`, in manifest order.
    pub fn declare_into(&self, session: &mut Session<'_>) -> Result<()> {
        for unit in &self.units {
            session.declare(
                &unit.name,
                unit.requires.iter().cloned(),
                shell::unit_thunk(&unit.name, unit.run.clone()),
            )?;
        }
        Ok(())
    }
}
