use crate::cidr;
use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AWS-0107: security group ingress must not be open to the internet.
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AWS-0107",
        provider: Provider::Aws,
        service: "vpc",
        short_code: "no-public-ingress-sgr",
        summary: "An ingress security group rule allows traffic from /0.",
        impact: "Your port exposed to the internet",
        resolution: "Set a more restrictive cidr range",
        explanation: "Opening up ports to the public internet is generally to be avoided. You \
                      should restrict access to IP addresses or ranges that explicitly require it \
                      where possible.",
        links: &["https://docs.aws.amazon.com/vpc/latest/userguide/security-group-rules-reference.html"],
        severity: Severity::Critical,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for group in &state.aws.vpc.security_groups {
        for rule in &group.ingress_rules {
            if rule.metadata.is_unmanaged() {
                continue;
            }
            let mut failed = false;
            for block in &rule.cidrs {
                if cidr::is_public(block.as_str()) && cidr::count_addresses(block.as_str()) > 1 {
                    failed = true;
                    results.add("Security group rule allows ingress from public internet.", block);
                }
            }
            if !failed {
                results.add_passed(&rule.metadata);
            }
        }
    }
    results
}
