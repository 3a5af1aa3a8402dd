// reqs-core/src/cycle.rs
use std::collections::HashMap;

use reqs_common::error::ReqsError;
use tracing::debug;

use crate::target::Target;

/// Explains a stalled resolution.
///
/// The walk is deterministic rather than exhaustive: from a seed it follows
/// only the first dependency of every target it reaches, and reports the first
/// loop found that way.
pub struct CycleDetector<'g> {
    graph: &'g HashMap<String, Target>,
}

impl<'g> CycleDetector<'g> {
    pub fn new(graph: &'g HashMap<String, Target>) -> Self {
        Self { graph }
    }

    /// Tries each dependency of `seed` in declaration order as the start of a
    /// first-dependency chain. Returns the loop closed by repeating its first
    /// name, e.g. `["a", "b", "a"]`.
    pub fn find_cycle(&self, seed: &Target) -> Option<Vec<String>> {
        for start in seed.dependencies() {
            let mut path: Vec<&str> = vec![seed.name()];
            let mut on_path: HashMap<&str, usize> = HashMap::from([(seed.name(), 0)]);
            let mut current = start.as_str();

            loop {
                if let Some(&pos) = on_path.get(current) {
                    let mut cycle: Vec<String> =
                        path[pos..].iter().map(|name| name.to_string()).collect();
                    cycle.push(current.to_string());
                    return Some(cycle);
                }
                let Some(target) = self.graph.get(current) else {
                    break;
                };
                on_path.insert(current, path.len());
                path.push(current);
                match target.dependencies().first() {
                    Some(next) => current = next.as_str(),
                    None => break,
                }
            }
            debug!(
                "No cycle through '{}' -> '{}', backtracking",
                seed.name(),
                start
            );
        }
        None
    }

    /// Builds the terminal error for a stall, seeding the search with each
    /// skipped target in turn.
    pub fn diagnose(&self, skipped: &[String]) -> ReqsError {
        for name in skipped {
            let Some(seed) = self.graph.get(name) else {
                continue;
            };
            if let Some(cycle) = self.find_cycle(seed) {
                return ReqsError::CycleDetected(render_cycle(&cycle));
            }
        }
        ReqsError::UnresolvedDependency(skipped.first().cloned().unwrap_or_default())
    }
}

/// `["a", "b", "a"]` renders as `a -> b -> a`.
pub fn render_cycle(cycle: &[String]) -> String {
    cycle.join(" -> ")
}
