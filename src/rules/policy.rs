use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{Finding, Severity, Status};

/// Policy verdict: the final pass/fail decision after applying the ignore
/// list and severity overrides to raw results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub total_results: usize,
    pub failed: usize,
    pub passed: usize,
    pub ignored: usize,
    pub highest_severity: Option<Severity>,
    pub fail_threshold: Severity,
}

/// Policy configuration loaded from `.iacshield.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Minimum severity of a failed result that fails the scan.
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,
    /// Rule ids or long ids whose results are reported as ignored.
    #[serde(default)]
    pub ignore_rules: HashSet<String>,
    /// Per-rule severity overrides, keyed by id or long id.
    #[serde(default)]
    pub overrides: HashMap<String, Severity>,
}

fn default_fail_on() -> Severity {
    Severity::High
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_on: default_fail_on(),
            ignore_rules: HashSet::new(),
            overrides: HashMap::new(),
        }
    }
}

impl Policy {
    /// Evaluate results against this policy and produce a verdict.
    pub fn evaluate(&self, findings: &[Finding]) -> PolicyVerdict {
        let effective = self.apply(findings);
        let count = |status: Status| effective.iter().filter(|f| f.status == status).count();

        let highest = effective
            .iter()
            .filter(|f| f.is_failed())
            .filter_map(Finding::severity)
            .max();
        let failed = highest.is_some_and(|sev| sev >= self.fail_on);

        PolicyVerdict {
            pass: !failed,
            total_results: effective.len(),
            failed: count(Status::Failed),
            passed: count(Status::Passed),
            ignored: count(Status::Ignored),
            highest_severity: highest,
            fail_threshold: self.fail_on,
        }
    }

    /// Mark ignored rules' results as `Ignored` and apply overrides.
    pub fn apply(&self, findings: &[Finding]) -> Vec<Finding> {
        findings
            .iter()
            .map(|f| {
                let mut f = f.clone();
                if let Some(rule) = f.rule.as_mut() {
                    if self.ignore_rules.contains(&rule.id)
                        || self.ignore_rules.contains(&rule.long_id)
                    {
                        f.status = Status::Ignored;
                    }
                    let override_sev = self
                        .overrides
                        .get(&rule.id)
                        .or_else(|| self.overrides.get(&rule.long_id));
                    if let Some(&sev) = override_sev {
                        rule.severity = sev;
                    }
                }
                f
            })
            .collect()
    }
}
