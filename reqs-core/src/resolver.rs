// reqs-core/src/resolver.rs
use std::collections::{HashMap, HashSet, VecDeque};

use reqs_common::error::{ReqsError, Result};
use reqs_common::Availability;
use tracing::{debug, error};

use crate::cycle::CycleDetector;
use crate::expander::TargetExpander;
use crate::target::{Action, Target};

/// Turns declared targets into an activation order.
///
/// Works in passes over a queue. A target whose dependencies are all resolved
/// is emitted; one that names something absent from the graph triggers
/// placeholder synthesis and is requeued; anything else is skipped until the
/// next pass. Two consecutive passes ending with the same skipped set and no
/// progress are a stall.
pub struct Resolver<'a> {
    graph: HashMap<String, Target>,
    expander: TargetExpander<'a>,
}

#[derive(Debug, Default)]
struct PassOutcome {
    skipped: Vec<String>,
    emitted: usize,
    expanded: bool,
}

impl PassOutcome {
    fn made_progress(&self) -> bool {
        self.expanded || self.emitted > 0
    }
}

impl<'a> Resolver<'a> {
    pub fn new(oracle: &'a dyn Availability) -> Self {
        Self {
            graph: HashMap::new(),
            expander: TargetExpander::new(oracle),
        }
    }

    pub fn resolve(mut self, declared: Vec<Target>) -> Result<Vec<Action>> {
        debug!("Starting resolution of {} declared targets", declared.len());

        let mut pending: VecDeque<String> = VecDeque::with_capacity(declared.len());
        for target in declared {
            let name = target.name().to_string();
            if self.graph.insert(name.clone(), target).is_none() {
                pending.push_back(name);
            }
        }

        let mut resolved: Vec<Action> = Vec::with_capacity(pending.len());
        let mut done: HashSet<String> = HashSet::with_capacity(pending.len());
        let mut previous_skipped: Option<Vec<String>> = None;
        let mut pass = 0usize;

        loop {
            pass += 1;
            let outcome = self.run_pass(&mut pending, &mut resolved, &mut done);
            debug!(
                "Pass {}: emitted {}, expanded {}, skipped {:?}",
                pass, outcome.emitted, outcome.expanded, outcome.skipped
            );

            if outcome.skipped.is_empty() {
                debug!(
                    "Resolution finished after {} passes: {} targets ({} synthesized)",
                    pass,
                    resolved.len(),
                    self.expander.synthesized_count()
                );
                #[cfg(debug_assertions)]
                self.assert_order(&resolved);
                return Ok(resolved);
            }

            if !outcome.made_progress()
                && previous_skipped.as_ref() == Some(&outcome.skipped)
            {
                error!(
                    "Resolution stalled after {} passes; unresolved: {:?}",
                    pass, outcome.skipped
                );
                return Err(self.diagnose(&outcome.skipped, &done));
            }

            pending.extend(outcome.skipped.iter().cloned());
            previous_skipped = Some(outcome.skipped);
        }
    }

    fn run_pass(
        &mut self,
        pending: &mut VecDeque<String>,
        resolved: &mut Vec<Action>,
        done: &mut HashSet<String>,
    ) -> PassOutcome {
        let mut outcome = PassOutcome::default();

        while let Some(name) = pending.pop_front() {
            if done.contains(&name) {
                continue;
            }
            let Some(target) = self.graph.get(&name) else {
                continue;
            };

            if target.dependencies().iter().all(|dep| done.contains(dep)) {
                debug!("'{}' is ready", name);
                resolved.push(target.payload().clone());
                done.insert(name);
                outcome.emitted += 1;
                continue;
            }

            let missing: Vec<String> = target
                .dependencies()
                .iter()
                .filter(|dep| !self.graph.contains_key(dep.as_str()))
                .cloned()
                .collect();

            if missing.is_empty() {
                debug!("'{}' waits on unresolved dependencies, skipping", name);
                outcome.skipped.push(name);
                continue;
            }

            debug!("'{}' references undeclared {:?}", name, missing);
            for placeholder in self.expander.expand(&missing) {
                let placeholder_name = placeholder.name().to_string();
                self.graph.insert(placeholder_name.clone(), placeholder);
                pending.push_back(placeholder_name);
            }
            pending.push_back(name);
            outcome.expanded = true;
        }

        outcome
    }

    /// Restricts the graph to the stalled targets and their unresolved edges
    /// before handing it to the cycle search.
    fn diagnose(&self, skipped: &[String], done: &HashSet<String>) -> ReqsError {
        let stalled: HashMap<String, Target> = skipped
            .iter()
            .filter_map(|name| self.graph.get(name))
            .map(|target| {
                let open_edges = target
                    .dependencies()
                    .iter()
                    .filter(|dep| !done.contains(dep.as_str()))
                    .cloned()
                    .collect();
                let view = Target::new(target.name(), open_edges, target.payload().clone());
                (target.name().to_string(), view)
            })
            .collect();

        CycleDetector::new(&stalled).diagnose(skipped)
    }

    #[cfg(debug_assertions)]
    fn assert_order(&self, resolved: &[Action]) {
        let index_map: HashMap<&str, usize> = resolved
            .iter()
            .enumerate()
            .map(|(i, action)| (action.name(), i))
            .collect();
        for (name, target) in &self.graph {
            for dep in target.dependencies() {
                if let (Some(&p_idx), Some(&c_idx)) =
                    (index_map.get(name.as_str()), index_map.get(dep.as_str()))
                {
                    debug_assert!(
                        p_idx > c_idx,
                        "Activation order violation: '{name}' appears before its dependency '{dep}'"
                    );
                }
            }
        }
    }
}

/// Convenience wrapper around [`Resolver`].
pub fn resolve(declared: Vec<Target>, oracle: &dyn Availability) -> Result<Vec<Action>> {
    Resolver::new(oracle).resolve(declared)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(name: &str, deps: &[&str]) -> Target {
        Target::new(
            name,
            deps.iter().map(|d| d.to_string()).collect(),
            Action::placeholder(name, false),
        )
    }

    fn order(actions: &[Action]) -> Vec<&str> {
        actions.iter().map(Action::name).collect()
    }

    fn position(actions: &[Action], name: &str) -> usize {
        actions
            .iter()
            .position(|a| a.name() == name)
            .unwrap_or_else(|| panic!("'{name}' missing from {:?}", order(actions)))
    }

    const NOTHING: fn(&str) -> bool = |_| false;

    #[test]
    fn empty_input_resolves_to_nothing() {
        assert!(resolve(Vec::new(), &NOTHING).unwrap().is_empty());
    }

    #[test]
    fn reversed_declarations_are_reordered() {
        let declared = vec![
            target("app", &["lib"]),
            target("lib", &["base"]),
            target("base", &[]),
        ];
        let resolved = resolve(declared, &NOTHING).unwrap();
        assert_eq!(order(&resolved), ["base", "lib", "app"]);
    }

    #[test]
    fn diamond_respects_every_edge() {
        let declared = vec![
            target("top", &["left", "right"]),
            target("left", &["bottom"]),
            target("right", &["bottom"]),
            target("bottom", &[]),
        ];
        let resolved = resolve(declared.clone(), &NOTHING).unwrap();
        assert_eq!(resolved.len(), 4);
        for t in &declared {
            for dep in t.dependencies() {
                assert!(position(&resolved, dep) < position(&resolved, t.name()));
            }
        }
    }

    #[test]
    fn undeclared_dependency_is_synthesized_first() {
        let oracle = |name: &str| name == "a";
        let resolved = resolve(vec![target("b", &["a"])], &oracle).unwrap();
        assert_eq!(order(&resolved), ["a", "b"]);
        assert!(resolved[0].is_placeholder());
        assert!(resolved[0].ensure());
    }

    #[test]
    fn shared_undeclared_dependency_is_synthesized_once() {
        let declared = vec![target("x", &["common"]), target("y", &["common", "common"])];
        let resolved = resolve(declared, &NOTHING).unwrap();
        assert_eq!(resolved.iter().filter(|a| a.name() == "common").count(), 1);
        assert_eq!(position(&resolved, "common"), 0);
    }

    #[test]
    fn cycle_is_reported() {
        let declared = vec![target("a", &["b"]), target("b", &["c"]), target("c", &["a"])];
        match resolve(declared, &NOTHING) {
            Err(ReqsError::CycleDetected(path)) => assert_eq!(path, "a -> b -> c -> a"),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn self_dependency_is_reported() {
        match resolve(vec![target("a", &["a"])], &NOTHING) {
            Err(ReqsError::CycleDetected(path)) => assert_eq!(path, "a -> a"),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn resolved_prefix_does_not_hide_a_cycle() {
        // `ok` resolves in the first pass, the loop behind it must still stall.
        let declared = vec![
            target("ok", &[]),
            target("p", &["ok", "q"]),
            target("q", &["p"]),
        ];
        match resolve(declared, &NOTHING) {
            Err(ReqsError::CycleDetected(path)) => assert_eq!(path, "p -> q -> p"),
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn cycle_behind_a_synthesized_dependency() {
        // `b` is skipped before `a` in the stalled pass, so it seeds the search.
        let declared = vec![target("a", &["missing", "b"]), target("b", &["a"])];
        match resolve(declared, &NOTHING) {
            Err(ReqsError::CycleDetected(path)) => assert_eq!(path, "b -> a -> b"),
            other => panic!("expected cycle, got {other:?}"),
        }
    }
}
