use crate::providers::aws::vpc::DEFAULT_SECURITY_GROUP_DESCRIPTION;
use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AWS-0099
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AWS-0099",
        provider: Provider::Aws,
        service: "vpc",
        short_code: "add-description-to-security-group",
        summary: "Missing description for security group.",
        impact: "Descriptions provide context for the firewall rule reasons",
        resolution: "Add descriptions for all security groups",
        explanation: "Security groups should include a description for auditing purposes. \
                      Simplifies auditing, debugging, and managing security groups.",
        links: &["https://www.cloudconformity.com/knowledge-base/aws/EC2/security-group-rules-description.html"],
        severity: Severity::Low,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for group in &state.aws.vpc.security_groups {
        if group.metadata.is_unmanaged() {
            continue;
        }
        if group.description.is_empty() {
            results.add("Security group does not have a description.", &group.description);
        } else if group.description.equal_to(DEFAULT_SECURITY_GROUP_DESCRIPTION) {
            results.add(
                "Security group explicitly uses the default description.",
                &group.description,
            );
        } else {
            results.add_passed(&group.metadata);
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::aws::vpc::SecurityGroup;
    use crate::types::{Metadata, StringValue};

    fn state(description: &str) -> State {
        let mut state = State::default();
        state.aws.vpc.security_groups.push(SecurityGroup {
            metadata: Metadata::test(),
            description: StringValue::new(description.into(), Metadata::test()),
            ingress_rules: Vec::new(),
            egress_rules: Vec::new(),
        });
        state
    }

    #[test]
    fn empty_description_fails() {
        assert_eq!(CHECK.run(&state("")).failed().count(), 1);
    }

    #[test]
    fn default_description_fails() {
        assert_eq!(CHECK.run(&state("Managed by Terraform")).failed().count(), 1);
    }

    #[test]
    fn proper_description_passes() {
        let results = CHECK.run(&state("some proper description"));
        assert_eq!(results.passed().count(), 1);
        assert_eq!(results.failed().count(), 0);
    }
}
