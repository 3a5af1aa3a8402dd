// reqs-core/src/target.rs
use std::fmt;
use std::sync::Arc;

use reqs_common::error::Result;

/// Deferred body of an action. Invoked at most once per successful run.
pub type Thunk = Arc<dyn Fn() -> Result<()> + Send + Sync>;

/// Name-tagged unit of work. Inert until the evaluator invokes it.
#[derive(Clone)]
pub struct Action {
    name: String,
    ensure: bool,
    thunk: Option<Thunk>,
}

impl Action {
    pub fn new(name: impl Into<String>, ensure: bool, thunk: Thunk) -> Self {
        Self {
            name: name.into(),
            ensure,
            thunk: Some(thunk),
        }
    }

    /// Body-less action for a synthesized target.
    pub fn placeholder(name: impl Into<String>, ensure: bool) -> Self {
        Self {
            name: name.into(),
            ensure,
            thunk: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the unit must be made present before its body runs.
    pub fn ensure(&self) -> bool {
        self.ensure
    }

    pub fn is_placeholder(&self) -> bool {
        self.thunk.is_none()
    }

    pub fn invoke(&self) -> Result<()> {
        match &self.thunk {
            Some(thunk) => thunk(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("ensure", &self.ensure)
            .field("placeholder", &self.is_placeholder())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Target {
    name: String,
    dependencies: Vec<String>,
    payload: Action,
}

impl Target {
    pub fn new(name: impl Into<String>, dependencies: Vec<String>, payload: Action) -> Self {
        Self {
            name: name.into(),
            dependencies,
            payload,
        }
    }

    /// Zero-dependency target standing in for a name nobody declared.
    pub fn placeholder(name: &str, ensure: bool) -> Self {
        Self::new(name, Vec::new(), Action::placeholder(name, ensure))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dependency names in declaration order.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn payload(&self) -> &Action {
        &self.payload
    }

    pub fn into_payload(self) -> Action {
        self.payload
    }
}
