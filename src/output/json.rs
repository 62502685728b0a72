use serde::Serialize;

use crate::error::Result;
use crate::rules::policy::PolicyVerdict;
use crate::rules::Finding;

#[derive(Serialize)]
struct JsonReport<'a> {
    tool: &'static str,
    version: &'static str,
    verdict: &'a PolicyVerdict,
    results: &'a [Finding],
}

/// Render results as a JSON report.
pub fn render(findings: &[Finding], verdict: &PolicyVerdict) -> Result<String> {
    let report = JsonReport {
        tool: "iacshield",
        version: env!("CARGO_PKG_VERSION"),
        verdict,
        results: findings,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::policy::Policy;
    use crate::rules::{RuleIdentity, Severity, Status};
    use crate::types::{Metadata, Range};

    #[test]
    fn report_carries_rule_and_location() {
        let findings = vec![Finding {
            status: Status::Failed,
            message: "Cluster allows plaintext communication.".into(),
            metadata: Metadata::new(
                Some(Range::new("msk.tf", 3, 3)),
                "aws_msk_cluster.c.encryption_info.encryption_in_transit.client_broker",
            ),
            rule: Some(RuleIdentity {
                id: "AVD-AWS-0073".into(),
                long_id: "aws-msk-enable-in-transit-encryption".into(),
                severity: Severity::High,
            }),
        }];
        let verdict = Policy::default().evaluate(&findings);

        let parsed: serde_json::Value =
            serde_json::from_str(&render(&findings, &verdict).unwrap()).unwrap();
        assert_eq!(parsed["tool"], "iacshield");
        assert_eq!(parsed["verdict"]["pass"], false);
        assert_eq!(parsed["results"][0]["status"], "failed");
        assert_eq!(parsed["results"][0]["rule"]["long_id"], "aws-msk-enable-in-transit-encryption");
    }
}
