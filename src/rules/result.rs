use serde::{Deserialize, Serialize};

use crate::types::{Metadata, Value};

/// Outcome of one rule for one inspected value or entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    Failed,
    Ignored,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::Failed => write!(f, "failed"),
            Self::Ignored => write!(f, "ignored"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// The rule a finding came from, stamped on by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleIdentity {
    /// AVD identifier (e.g., "AVD-AWS-0105").
    pub id: String,
    /// Human-readable identifier (e.g., "aws-vpc-no-public-ingress-acl").
    pub long_id: String,
    /// Effective severity, after any policy override.
    pub severity: Severity,
}

/// A single rule result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub status: Status,
    /// Empty for passed results.
    pub message: String,
    /// Location of the offending value, or of the entity that passed.
    pub metadata: Metadata,
    pub rule: Option<RuleIdentity>,
}

impl Finding {
    pub fn is_failed(&self) -> bool {
        self.status == Status::Failed
    }

    pub fn rule_id(&self) -> &str {
        self.rule.as_ref().map(|r| r.id.as_str()).unwrap_or("")
    }

    pub fn severity(&self) -> Option<Severity> {
        self.rule.as_ref().map(|r| r.severity)
    }
}

/// Append-only result list built by a single rule evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Results(Vec<Finding>);

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure pointing at the value that caused it.
    pub fn add<T>(&mut self, message: impl Into<String>, cause: &Value<T>) {
        self.push(Status::Failed, message.into(), cause.metadata().clone());
    }

    /// Record a failure against a whole entity.
    pub fn add_at(&mut self, message: impl Into<String>, metadata: &Metadata) {
        self.push(Status::Failed, message.into(), metadata.clone());
    }

    pub fn add_passed(&mut self, metadata: &Metadata) {
        self.push(Status::Passed, String::new(), metadata.clone());
    }

    pub fn add_ignored(&mut self, metadata: &Metadata) {
        self.push(Status::Ignored, String::new(), metadata.clone());
    }

    fn push(&mut self, status: Status, message: String, metadata: Metadata) {
        self.0.push(Finding {
            status,
            message,
            metadata,
            rule: None,
        });
    }

    pub(crate) fn stamp(&mut self, identity: &RuleIdentity) {
        for finding in &mut self.0 {
            finding.rule = Some(identity.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Finding> {
        self.0.iter()
    }

    pub fn failed(&self) -> impl Iterator<Item = &Finding> {
        self.0.iter().filter(|f| f.status == Status::Failed)
    }

    pub fn passed(&self) -> impl Iterator<Item = &Finding> {
        self.0.iter().filter(|f| f.status == Status::Passed)
    }

    pub fn into_vec(self) -> Vec<Finding> {
        self.0
    }
}

impl IntoIterator for Results {
    type Item = Finding;
    type IntoIter = std::vec::IntoIter<Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Results {
    type Item = &'a Finding;
    type IntoIter = std::slice::Iter<'a, Finding>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BoolValue;

    #[test]
    fn failure_points_at_value() {
        let meta = Metadata::test();
        let value = BoolValue::new(false, meta.clone());
        let mut results = Results::new();
        results.add("Cache data is not encrypted.", &value);
        results.add_passed(&meta);

        assert_eq!(results.len(), 2);
        assert_eq!(results.failed().count(), 1);
        assert_eq!(results.passed().count(), 1);
        let failed = results.failed().next().unwrap();
        assert_eq!(failed.metadata, meta);
        assert!(failed.rule.is_none());
    }

    #[test]
    fn stamp_sets_identity_on_every_result() {
        let mut results = Results::new();
        results.add_passed(&Metadata::test());
        results.add_ignored(&Metadata::test());
        results.stamp(&RuleIdentity {
            id: "AVD-GIT-0001".into(),
            long_id: "github-repositories-private".into(),
            severity: Severity::Critical,
        });
        assert!(results.iter().all(|f| f.rule_id() == "AVD-GIT-0001"));
        assert_eq!(results.iter().nth(1).map(|f| f.status), Some(Status::Ignored));
    }

    #[test]
    fn severity_parsing_and_order() {
        assert_eq!(Severity::from_str_lenient("CRIT"), Some(Severity::Critical));
        assert_eq!(Severity::from_str_lenient("med"), Some(Severity::Medium));
        assert_eq!(Severity::from_str_lenient("info"), None);
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::Low < Severity::Medium);
    }
}
