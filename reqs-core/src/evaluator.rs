// reqs-core/src/evaluator.rs
use reqs_common::error::Result;
use tracing::{debug, info};

use crate::target::Action;

/// Hook for the "ensure present" directive carried by some actions.
pub trait Ensure {
    fn ensure_present(&self, name: &str) -> Result<()>;
}

/// Runs an activation order sequentially. Failures are not caught and actions
/// that already ran are not undone.
pub struct Evaluator<'e> {
    verbose: bool,
    ensurer: Option<&'e dyn Ensure>,
}

impl<'e> Evaluator<'e> {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            ensurer: None,
        }
    }

    pub fn with_ensurer(mut self, ensurer: &'e dyn Ensure) -> Self {
        self.ensurer = Some(ensurer);
        self
    }

    pub fn run(&self, resolved: &[Action]) -> Result<()> {
        for action in resolved {
            if self.verbose {
                info!("{}", action.name());
            } else {
                debug!("Activating '{}'", action.name());
            }

            if action.ensure() {
                match self.ensurer {
                    Some(ensurer) => ensurer.ensure_present(action.name())?,
                    None => debug!("No ensurer configured, '{}' assumed present", action.name()),
                }
            }
            action.invoke()?;
        }
        Ok(())
    }
}

/// Evaluates `resolved` without an ensure hook.
pub fn run(resolved: &[Action], verbose: bool) -> Result<()> {
    Evaluator::new(verbose).run(resolved)
}
