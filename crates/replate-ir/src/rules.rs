//! Rename rules and name resolution
//!
//! A rule is a prefix plus an exact-match ignore set, with an optional
//! table of one-off substitutions for ad-hoc single-entity renames.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A renaming rule applied uniformly to every addressable entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    /// Prefix prepended to matching names; may be empty
    pub prefix: String,
    /// Names that are never renamed, matched exactly
    pub ignore: HashSet<String>,
    /// Exact old-name to new-name substitutions, bypassing the prefix
    pub overrides: HashMap<String, String>,
}

impl RuleSet {
    /// Create a rule with the given prefix and no ignores or overrides
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ignore: HashSet::new(),
            overrides: HashMap::new(),
        }
    }

    /// Mark a name as exempt from renaming
    pub fn add_ignore(&mut self, name: impl Into<String>) {
        self.ignore.insert(name.into());
    }

    /// Add a one-off substitution for an exact name
    pub fn add_substitution(&mut self, old: impl Into<String>, new: impl Into<String>) {
        self.overrides.insert(old.into(), new.into());
    }

    /// Resolve the new name for `name`, or `None` if it is left alone.
    ///
    /// The ignore set wins over everything else; substitutions win over
    /// the prefix; an empty prefix with no matching substitution means
    /// no rename.
    pub fn resolve(&self, name: &str) -> Option<String> {
        if self.ignore.contains(name) {
            return None;
        }
        if let Some(replacement) = self.overrides.get(name) {
            return Some(replacement.clone());
        }
        if !self.prefix.is_empty() {
            return Some(format!("{}{}", self.prefix, name));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_applies_to_any_name() {
        let rules = RuleSet::with_prefix("pfx_");
        assert_eq!(rules.resolve("alu"), Some("pfx_alu".to_string()));
        assert_eq!(rules.resolve(""), Some("pfx_".to_string()));
    }

    #[test]
    fn test_ignore_beats_prefix_and_substitution() {
        let mut rules = RuleSet::with_prefix("pfx_");
        rules.add_substitution("top", "renamed_top");
        rules.add_ignore("top");
        assert_eq!(rules.resolve("top"), None);
        assert_eq!(rules.resolve("cpu"), Some("pfx_cpu".to_string()));
    }

    #[test]
    fn test_substitution_beats_prefix() {
        let mut rules = RuleSet::with_prefix("pfx_");
        rules.add_substitution("m", "FooBar");
        assert_eq!(rules.resolve("m"), Some("FooBar".to_string()));
        assert_eq!(rules.resolve("n"), Some("pfx_n".to_string()));
    }

    #[test]
    fn test_empty_prefix_degenerates_to_pure_substitution() {
        let mut rules = RuleSet::default();
        rules.add_substitution("m", "FooBar");
        assert_eq!(rules.resolve("m"), Some("FooBar".to_string()));
        assert_eq!(rules.resolve("n"), None);
    }
}
