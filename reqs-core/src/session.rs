// reqs-core/src/session.rs
use reqs_common::error::Result;
use reqs_common::Availability;
use tracing::debug;

use crate::evaluator::{Ensure, Evaluator};
use crate::resolver::Resolver;
use crate::store::TargetStore;
use crate::target::{Action, Thunk};

/// Declaration store plus the oracle used to annotate targets, owned by the
/// caller and reused across runs.
pub struct Session<'o> {
    store: TargetStore,
    oracle: &'o dyn Availability,
}

impl<'o> Session<'o> {
    pub fn new(oracle: &'o dyn Availability) -> Self {
        Self {
            store: TargetStore::new(),
            oracle,
        }
    }

    pub fn declare<I>(&mut self, name: &str, dependencies: I, body: Thunk) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let action = Action::new(name, self.oracle.is_available(name), body);
        let dependencies: Vec<String> = dependencies.into_iter().map(Into::into).collect();
        self.store.declare(name, dependencies, action)
    }

    /// Declares with a `[":requires", ...]` token list.
    pub fn declare_with_marker(&mut self, name: &str, tokens: &[&str], body: Thunk) -> Result<()> {
        let action = Action::new(name, self.oracle.is_available(name), body);
        self.store.declare_with_marker(name, tokens, action)
    }

    pub fn pending(&self) -> usize {
        self.store.len()
    }

    /// Resolves the declared targets without running them. The store is
    /// emptied first, whatever the outcome.
    pub fn plan(&mut self) -> Result<Vec<Action>> {
        let declared = self.store.snapshot();
        self.store.clear();
        debug!("Planning {} declared targets", declared.len());
        Resolver::new(self.oracle).resolve(declared)
    }

    pub fn run(&mut self, verbose: bool) -> Result<()> {
        let order = self.plan()?;
        Evaluator::new(verbose).run(&order)
    }

    pub fn run_with(&mut self, verbose: bool, ensurer: &dyn Ensure) -> Result<()> {
        let order = self.plan()?;
        Evaluator::new(verbose).with_ensurer(ensurer).run(&order)
    }
}
