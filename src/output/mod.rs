pub mod console;
pub mod json;
pub mod sarif;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::policy::PolicyVerdict;
use crate::rules::{Finding, Status};

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Sarif,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            "sarif" => Some(Self::Sarif),
            _ => None,
        }
    }
}

/// Render results into the specified format. Passed results are dropped
/// unless `include_passed` is set; failed and ignored results always show.
pub fn render(
    findings: &[Finding],
    verdict: &PolicyVerdict,
    format: OutputFormat,
    target_name: &str,
    include_passed: bool,
) -> Result<String> {
    let shown: Vec<Finding> = findings
        .iter()
        .filter(|f| include_passed || f.status != Status::Passed)
        .cloned()
        .collect();

    match format {
        OutputFormat::Console => Ok(console::render(&shown, verdict)),
        OutputFormat::Json => json::render(&shown, verdict),
        OutputFormat::Sarif => sarif::render(&shown, target_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::policy::Policy;
    use crate::rules::{RuleIdentity, Severity};
    use crate::types::Metadata;

    fn finding(status: Status) -> Finding {
        Finding {
            status,
            message: if status == Status::Failed {
                "Repository is public.".into()
            } else {
                String::new()
            },
            metadata: Metadata::test(),
            rule: Some(RuleIdentity {
                id: "AVD-GIT-0001".into(),
                long_id: "github-repositories-private".into(),
                severity: Severity::Critical,
            }),
        }
    }

    #[test]
    fn passed_results_hidden_by_default() {
        let findings = vec![finding(Status::Failed), finding(Status::Passed)];
        let verdict = Policy::default().evaluate(&findings);

        let hidden = render(&findings, &verdict, OutputFormat::Json, "t", false).unwrap();
        let shown = render(&findings, &verdict, OutputFormat::Json, "t", true).unwrap();
        assert_eq!(hidden.matches("\"status\": \"passed\"").count(), 0);
        assert_eq!(shown.matches("\"status\": \"passed\"").count(), 1);
    }

    #[test]
    fn format_names() {
        assert_eq!(OutputFormat::from_str_lenient("SARIF"), Some(OutputFormat::Sarif));
        assert_eq!(OutputFormat::from_str_lenient("text"), Some(OutputFormat::Console));
        assert_eq!(OutputFormat::from_str_lenient("html"), None);
    }
}
