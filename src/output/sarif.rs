use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::error::Result;
use crate::rules::{Finding, RuleIdentity, Severity, Status};

/// Render results as SARIF 2.1.0.
///
/// Failed results become SARIF results; ignored results are kept with an
/// external suppression. Passed results have no SARIF counterpart.
pub fn render(findings: &[Finding], target_name: &str) -> Result<String> {
    let reported: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.status != Status::Passed)
        .collect();

    let identities: BTreeMap<&str, &RuleIdentity> = reported
        .iter()
        .filter_map(|f| f.rule.as_ref())
        .map(|rule| (rule.id.as_str(), rule))
        .collect();

    let rules: Vec<Value> = identities
        .values()
        .map(|rule| {
            json!({
                "id": rule.id,
                "name": rule.long_id,
                "shortDescription": { "text": rule.long_id },
                "defaultConfiguration": {
                    "level": severity_to_sarif_level(rule.severity),
                },
            })
        })
        .collect();

    let results: Vec<Value> = reported
        .iter()
        .map(|f| {
            let mut result = json!({
                "ruleId": f.rule_id(),
                "level": f.severity().map_or("note", severity_to_sarif_level),
                "message": { "text": f.message },
            });

            if let Some(range) = f.metadata.range() {
                result["locations"] = json!([{
                    "physicalLocation": {
                        "artifactLocation": {
                            "uri": range.filename.display().to_string(),
                        },
                        "region": {
                            "startLine": range.start_line,
                            "endLine": range.end_line,
                        },
                    },
                    "logicalLocations": [{
                        "fullyQualifiedName": f.metadata.reference(),
                    }],
                }]);
            }

            if f.status == Status::Ignored {
                result["suppressions"] = json!([{ "kind": "external" }]);
            }

            result
        })
        .collect();

    let sarif = json!({
        "$schema": "https://docs.oasis-open.org/sarif/sarif/v2.1.0/errata01/os/schemas/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "iacshield",
                    "version": env!("CARGO_PKG_VERSION"),
                    "semanticVersion": env!("CARGO_PKG_VERSION"),
                    "rules": rules,
                },
            },
            "results": results,
            "automationDetails": {
                "id": format!("iacshield/{}", target_name),
            },
        }],
    });

    Ok(serde_json::to_string_pretty(&sarif)?)
}

fn severity_to_sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical | Severity::High => "error",
        Severity::Medium => "warning",
        Severity::Low => "note",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Metadata, Range};

    fn finding(status: Status, id: &str, severity: Severity) -> Finding {
        Finding {
            status,
            message: "Network ACL rule allows ingress from public internet.".into(),
            metadata: Metadata::new(
                Some(Range::new("vpc.tf", 10, 14)),
                "aws_network_acl_rule.open.cidr_block",
            ),
            rule: Some(RuleIdentity {
                id: id.into(),
                long_id: "aws-vpc-no-public-ingress-acl".into(),
                severity,
            }),
        }
    }

    #[test]
    fn failed_and_ignored_reported_passed_dropped() {
        let findings = vec![
            finding(Status::Failed, "AVD-AWS-0105", Severity::High),
            finding(Status::Ignored, "AVD-AWS-0105", Severity::High),
            finding(Status::Passed, "AVD-AWS-0102", Severity::Low),
        ];
        let log: Value = serde_json::from_str(&render(&findings, "infra").unwrap()).unwrap();
        let run = &log["runs"][0];

        assert_eq!(run["tool"]["driver"]["rules"].as_array().unwrap().len(), 1);
        let results = run["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["level"], "error");
        assert_eq!(
            results[0]["locations"][0]["physicalLocation"]["region"]["endLine"],
            14
        );
        assert!(results[0].get("suppressions").is_none());
        assert_eq!(results[1]["suppressions"][0]["kind"], "external");
        assert_eq!(run["automationDetails"]["id"], "iacshield/infra");
    }
}
