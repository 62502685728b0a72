use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AWS-0124
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AWS-0124",
        provider: Provider::Aws,
        service: "vpc",
        short_code: "add-description-to-security-group-rule",
        summary: "Missing description for security group rule.",
        impact: "Descriptions provide context for the firewall rule reasons",
        resolution: "Add descriptions for all security groups rules",
        explanation: "Security group rules should include a description for auditing purposes.",
        links: &["https://www.cloudconformity.com/knowledge-base/aws/EC2/security-group-rules-description.html"],
        severity: Severity::Low,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for group in &state.aws.vpc.security_groups {
        for rule in group.ingress_rules.iter().chain(&group.egress_rules) {
            if rule.metadata.is_unmanaged() {
                continue;
            }
            if rule.description.is_empty() {
                results.add("Security group rule does not have a description.", &rule.description);
            } else {
                results.add_passed(&rule.metadata);
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::adapt;
    use crate::block::{Block, Module};

    #[test]
    fn each_rule_is_inspected() {
        let state = adapt(&[Module::root(vec![Block::resource("aws_security_group", "sg")
            .with_attribute("description", "web")
            .with_block(Block::nested("ingress").with_attribute("description", "https"))
            .with_block(Block::nested("egress"))])]);
        let results = CHECK.run(&state);
        assert_eq!(results.len(), 2);
        assert_eq!(results.passed().count(), 1);
        let failure = results.failed().next().unwrap();
        assert!(failure.metadata.is_default());
    }
}
