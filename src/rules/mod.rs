pub mod builtin;
pub mod policy;
pub mod registry;
pub mod result;

use rayon::prelude::*;
use serde::Serialize;

use crate::providers::{Provider, State};

pub use registry::{Registry, RuleHandle};
pub use result::{Finding, Results, RuleIdentity, Severity, Status};

/// Static description of a check.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    /// AVD identifier, unique across the catalog.
    pub id: &'static str,
    pub provider: Provider,
    pub service: &'static str,
    pub short_code: &'static str,
    pub summary: &'static str,
    pub impact: &'static str,
    pub resolution: &'static str,
    pub explanation: &'static str,
    pub links: &'static [&'static str],
    pub severity: Severity,
}

impl Rule {
    /// `<provider>-<service>-<short_code>`.
    pub fn long_id(&self) -> String {
        format!("{}-{}-{}", self.provider, self.service, self.short_code)
    }

    pub fn identity(&self) -> RuleIdentity {
        RuleIdentity {
            id: self.id.to_string(),
            long_id: self.long_id(),
            severity: self.severity,
        }
    }
}

/// A rule and the function that evaluates it.
///
/// Evaluation functions walk the whole `State` themselves. They skip
/// unmanaged entities and add exactly one result per entity they inspect.
#[derive(Clone)]
pub struct Check {
    pub rule: Rule,
    pub evaluate: fn(&State) -> Results,
}

impl Check {
    /// Evaluate against `state` and stamp every result with this rule.
    pub fn run(&self, state: &State) -> Results {
        let mut results = (self.evaluate)(state);
        results.stamp(&self.rule.identity());
        results
    }
}

/// The rule engine runs every registered check against a state.
pub struct RuleEngine {
    registry: Registry,
    parallel: bool,
}

impl RuleEngine {
    /// Engine over the built-in catalog.
    pub fn new() -> crate::error::Result<Self> {
        Ok(Self::with_registry(builtin::registry()?))
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            parallel: true,
        }
    }

    /// Run checks on the calling thread instead of the rayon pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run all checks. Results come back in registry order whichever way
    /// the checks were scheduled.
    pub fn run(&self, state: &State) -> Vec<Finding> {
        let run_one = |check: &Check| {
            let results = check.run(state);
            tracing::debug!(
                rule = check.rule.id,
                failed = results.failed().count(),
                total = results.len(),
                "rule evaluated"
            );
            results
        };

        let per_rule: Vec<Results> = if self.parallel {
            self.registry.all().par_iter().map(run_one).collect()
        } else {
            self.registry.all().iter().map(run_one).collect()
        };

        per_rule.into_iter().flatten().collect()
    }

    /// Descriptors of all registered rules.
    pub fn list_rules(&self) -> Vec<&Rule> {
        self.registry.all().iter().map(|c| &c.rule).collect()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
