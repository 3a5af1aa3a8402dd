// reqs/src/shell.rs
use std::process::Command;
use std::sync::Arc;

use reqs_common::error::{ReqsError, Result};
use reqs_core::{Ensure, Thunk};
use tracing::debug;

pub fn run_shell(label: &str, command: &str) -> Result<()> {
    debug!("Running '{}' for '{}'", command, label);
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .map_err(|e| ReqsError::CommandExecError(format!("{label}: failed to spawn sh: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(ReqsError::CommandExecError(format!(
            "{label}: '{command}' exited with {status}"
        )))
    }
}

/// Body for a manifest unit. Units without a command do nothing when run.
pub fn unit_thunk(name: &str, command: Option<String>) -> Thunk {
    let name = name.to_string();
    Arc::new(move || match &command {
        Some(command) => run_shell(&name, command),
        None => Ok(()),
    })
}

/// Runs `REQS_ENSURE_CMD` with `{name}` substituted.
pub struct ShellEnsure {
    template: Option<String>,
}

impl ShellEnsure {
    pub fn new(template: Option<String>) -> Self {
        Self { template }
    }

    fn command_for(&self, name: &str) -> Option<String> {
        self.template
            .as_ref()
            .map(|template| template.replace("{name}", name))
    }
}

impl Ensure for ShellEnsure {
    fn ensure_present(&self, name: &str) -> Result<()> {
        match self.command_for(name) {
            Some(command) => run_shell(name, &command),
            None => {
                debug!("REQS_ENSURE_CMD not set, skipping ensure for '{}'", name);
                Ok(())
            }
        }
    }
}
