// reqs-core/src/expander.rs
use std::collections::HashSet;

use reqs_common::Availability;
use tracing::debug;

use crate::target::Target;

/// Synthesizes zero-dependency placeholders for names nobody declared.
pub struct TargetExpander<'a> {
    oracle: &'a dyn Availability,
    synthesized: HashSet<String>,
}

impl<'a> TargetExpander<'a> {
    pub fn new(oracle: &'a dyn Availability) -> Self {
        Self {
            oracle,
            synthesized: HashSet::new(),
        }
    }

    /// One placeholder per name. Names already synthesized in this run, and
    /// repeats within `missing`, yield nothing.
    pub fn expand(&mut self, missing: &[String]) -> Vec<Target> {
        let mut targets = Vec::with_capacity(missing.len());
        for name in missing {
            if !self.synthesized.insert(name.clone()) {
                continue;
            }
            let ensure = self.oracle.is_available(name);
            debug!(
                "Synthesizing placeholder for undeclared dependency '{}' (ensure={})",
                name, ensure
            );
            targets.push(Target::placeholder(name, ensure));
        }
        targets
    }

    pub fn synthesized_count(&self) -> usize {
        self.synthesized.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_carry_availability() {
        let oracle = |name: &str| name == "dash";
        let mut expander = TargetExpander::new(&oracle);

        let targets = expander.expand(&["dash".to_string(), "local-lib".to_string()]);
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|t| t.dependencies().is_empty()));
        assert!(targets.iter().all(|t| t.payload().is_placeholder()));
        assert!(targets[0].payload().ensure());
        assert!(!targets[1].payload().ensure());
    }

    #[test]
    fn never_synthesizes_a_name_twice() {
        let oracle = |_: &str| true;
        let mut expander = TargetExpander::new(&oracle);

        let first = expander.expand(&["a".to_string(), "a".to_string()]);
        let second = expander.expand(&["a".to_string(), "b".to_string()]);
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name(), "b");
        assert_eq!(expander.synthesized_count(), 2);
    }
}
