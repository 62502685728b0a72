use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, ShieldError};

use super::Check;

/// Position of a check in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleHandle(usize);

/// Ordered set of checks. Filled once at startup, read-only afterwards.
#[derive(Default)]
pub struct Registry {
    checks: Vec<Check>,
    by_id: HashMap<&'static str, usize>,
    by_long_id: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check. Reusing an id or long id is a programming error.
    pub fn register(&mut self, check: Check) -> Result<RuleHandle> {
        let long_id = check.rule.long_id();
        if self.by_id.contains_key(check.rule.id) {
            return Err(ShieldError::DuplicateRule(check.rule.id.to_string()));
        }
        if self.by_long_id.contains_key(&long_id) {
            return Err(ShieldError::DuplicateRule(long_id));
        }

        let index = self.checks.len();
        self.by_id.insert(check.rule.id, index);
        self.by_long_id.insert(long_id, index);
        self.checks.push(check);
        Ok(RuleHandle(index))
    }

    /// Every check, in registration order.
    pub fn all(&self) -> &[Check] {
        &self.checks
    }

    pub fn get(&self, id: &str) -> Option<&Check> {
        self.by_id
            .get(id)
            .or_else(|| self.by_long_id.get(id))
            .map(|&index| &self.checks[index])
    }

    pub fn resolve(&self, handle: RuleHandle) -> Option<&Check> {
        self.checks.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Ids (or long ids) carried by more than one check. Empty unless the
    /// registry was assembled without going through `register`.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen: BTreeMap<String, usize> = BTreeMap::new();
        for check in &self.checks {
            *seen.entry(check.rule.id.to_string()).or_default() += 1;
            *seen.entry(check.rule.long_id()).or_default() += 1;
        }
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{Provider, State};
    use crate::rules::{Results, Rule, Severity};

    fn check(id: &'static str, short_code: &'static str) -> Check {
        Check {
            rule: Rule {
                id,
                provider: Provider::GitHub,
                service: "repositories",
                short_code,
                summary: "test rule",
                impact: "",
                resolution: "",
                explanation: "",
                links: &[],
                severity: Severity::Low,
            },
            evaluate: |_: &State| Results::new(),
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = Registry::new();
        let handle = registry.register(check("AVD-TEST-0001", "one")).unwrap();
        registry.register(check("AVD-TEST-0002", "two")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve(handle).map(|c| c.rule.id), Some("AVD-TEST-0001"));
        assert!(registry.get("AVD-TEST-0002").is_some());
        assert!(registry.get("github-repositories-one").is_some());
        assert!(registry.get("AVD-TEST-0003").is_none());
        assert!(registry.duplicate_ids().is_empty());
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut registry = Registry::new();
        registry.register(check("AVD-TEST-0001", "one")).unwrap();
        let err = registry.register(check("AVD-TEST-0001", "other")).unwrap_err();
        assert!(matches!(err, ShieldError::DuplicateRule(id) if id == "AVD-TEST-0001"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_long_id_is_rejected() {
        let mut registry = Registry::new();
        registry.register(check("AVD-TEST-0001", "one")).unwrap();
        let err = registry.register(check("AVD-TEST-0002", "one")).unwrap_err();
        assert!(matches!(err, ShieldError::DuplicateRule(id) if id == "github-repositories-one"));
    }
}
