// reqs-core/src/store.rs
use std::collections::HashMap;

use reqs_common::error::{ReqsError, Result};
use tracing::debug;

use crate::target::{Action, Target};

/// Marker introducing a dependency list in token form.
pub const REQUIRES_MARKER: &str = ":requires";

/// Declared targets for one resolution run.
///
/// Append-only until a run snapshots it. Dependencies are not checked against
/// each other here; unknown names are legal and handled during resolution.
#[derive(Debug, Default)]
pub struct TargetStore {
    targets: Vec<Target>,
    index: HashMap<String, usize>,
}

impl TargetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a target. A repeated name keeps its original position and
    /// takes the newest dependencies and payload.
    pub fn declare(&mut self, name: &str, dependencies: Vec<String>, payload: Action) -> Result<()> {
        validate_identifier(name, name)?;
        for dep in &dependencies {
            validate_identifier(name, dep)?;
        }

        let target = Target::new(name, dependencies, payload);
        match self.index.get(name) {
            Some(&slot) => {
                debug!("Re-declaration of '{}' replaces the previous one", name);
                self.targets[slot] = target;
            }
            None => {
                self.index.insert(name.to_string(), self.targets.len());
                self.targets.push(target);
            }
        }
        Ok(())
    }

    /// Like [`TargetStore::declare`], but takes the dependency list as tokens
    /// of the form `[":requires", "a", "b"]`.
    pub fn declare_with_marker(&mut self, name: &str, tokens: &[&str], payload: Action) -> Result<()> {
        let dependencies = parse_requires(name, tokens)?;
        self.declare(name, dependencies, payload)
    }

    /// Declared targets in first-declaration order.
    pub fn snapshot(&self) -> Vec<Target> {
        self.targets.clone()
    }

    pub fn clear(&mut self) {
        self.targets.clear();
        self.index.clear();
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}

fn parse_requires(owner: &str, tokens: &[&str]) -> Result<Vec<String>> {
    let mut dependencies = Vec::new();
    let mut after_marker = false;
    let mut names_since_marker = 0usize;

    for token in tokens {
        if *token == REQUIRES_MARKER {
            if after_marker && names_since_marker == 0 {
                return Err(dangling_marker(owner));
            }
            after_marker = true;
            names_since_marker = 0;
            continue;
        }
        if !after_marker {
            return Err(ReqsError::InvalidDeclaration(format!(
                "'{owner}': unexpected token '{token}' before '{REQUIRES_MARKER}'"
            )));
        }
        dependencies.push((*token).to_string());
        names_since_marker += 1;
    }

    if after_marker && names_since_marker == 0 {
        return Err(dangling_marker(owner));
    }
    Ok(dependencies)
}

fn dangling_marker(owner: &str) -> ReqsError {
    ReqsError::InvalidDeclaration(format!(
        "'{owner}': '{REQUIRES_MARKER}' must be followed by at least one name"
    ))
}

fn validate_identifier(owner: &str, ident: &str) -> Result<()> {
    if ident.is_empty() || ident.chars().any(char::is_whitespace) || ident.starts_with(':') {
        return Err(ReqsError::InvalidDeclaration(format!(
            "'{owner}': '{ident}' is not a valid identifier"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declare(store: &mut TargetStore, name: &str, deps: &[&str]) -> Result<()> {
        store.declare(
            name,
            deps.iter().map(|d| d.to_string()).collect(),
            Action::placeholder(name, false),
        )
    }

    #[test]
    fn snapshot_keeps_declaration_order() {
        let mut store = TargetStore::new();
        declare(&mut store, "b", &["a"]).unwrap();
        declare(&mut store, "c", &[]).unwrap();
        let names: Vec<_> = store.snapshot().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, ["b", "c"]);
    }

    #[test]
    fn redeclaration_replaces_in_place() {
        let mut store = TargetStore::new();
        declare(&mut store, "a", &[]).unwrap();
        declare(&mut store, "b", &[]).unwrap();
        declare(&mut store, "a", &["b"]).unwrap();

        let snapshot = store.snapshot();
        assert_eq!(store.len(), 2);
        assert_eq!(snapshot[0].name(), "a");
        assert_eq!(snapshot[0].dependencies(), ["b".to_string()]);
    }

    #[test]
    fn unknown_dependencies_are_accepted() {
        let mut store = TargetStore::new();
        declare(&mut store, "b", &["never-declared"]).unwrap();
        assert!(store.contains("b"));
        assert!(!store.contains("never-declared"));
    }

    #[test]
    fn rejects_malformed_identifiers() {
        let mut store = TargetStore::new();
        assert!(matches!(
            declare(&mut store, "", &[]),
            Err(ReqsError::InvalidDeclaration(_))
        ));
        assert!(matches!(
            declare(&mut store, "a", &["has space"]),
            Err(ReqsError::InvalidDeclaration(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn marker_tokens() {
        assert_eq!(
            parse_requires("x", &[":requires", "a", "b"]).unwrap(),
            ["a", "b"]
        );
        assert!(parse_requires("x", &[]).unwrap().is_empty());
        assert!(matches!(
            parse_requires("x", &[":requires"]),
            Err(ReqsError::InvalidDeclaration(_))
        ));
        assert!(matches!(
            parse_requires("x", &[":requires", ":requires", "a"]),
            Err(ReqsError::InvalidDeclaration(_))
        ));
        assert!(parse_requires("x", &["a"]).is_err());
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = TargetStore::new();
        store
            .declare_with_marker("a", &[":requires", "b"], Action::placeholder("a", false))
            .unwrap();
        store.clear();
        assert!(store.is_empty());
        assert!(store.snapshot().is_empty());
    }
}
