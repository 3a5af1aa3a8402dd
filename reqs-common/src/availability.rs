use std::collections::HashSet;

/// Answers whether a named unit can be made present.
///
/// Consulted when a declared target is registered and when a placeholder is
/// synthesized for a dependency nobody declared. Implementations may block
/// (e.g. on a catalog refresh) and are expected to memoise their answers.
pub trait Availability {
    fn is_available(&self, name: &str) -> bool;
}

impl<F> Availability for F
where
    F: Fn(&str) -> bool,
{
    fn is_available(&self, name: &str) -> bool {
        self(name)
    }
}

impl Availability for HashSet<String> {
    fn is_available(&self, name: &str) -> bool {
        self.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_and_sets_answer_lookups() {
        let nothing = |_: &str| false;
        assert!(!nothing.is_available("magit"));

        let set: HashSet<String> = ["magit".to_string()].into_iter().collect();
        assert!(set.is_available("magit"));
        assert!(!set.is_available("evil"));
    }
}
