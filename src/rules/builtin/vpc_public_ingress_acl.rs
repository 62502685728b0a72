use crate::cidr;
use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AWS-0105: allowing network ACL ingress rules must not be open to
/// the internet.
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AWS-0105",
        provider: Provider::Aws,
        service: "vpc",
        short_code: "no-public-ingress-acl",
        summary: "An ingress Network ACL rule allows specific ports from /0.",
        impact: "The ports are exposed for ingressing data to the internet",
        resolution: "Set a more restrictive cidr range",
        explanation: "Opening up ACLs to the public internet is potentially dangerous. You \
                      should restrict access to IP addresses or ranges that explicitly require it \
                      where possible.",
        links: &["https://docs.aws.amazon.com/vpc/latest/userguide/vpc-network-acls.html"],
        severity: Severity::Critical,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for acl in &state.aws.vpc.network_acls {
        for rule in &acl.rules {
            if rule.metadata.is_unmanaged() || !rule.is_ingress() || !rule.is_allow() {
                continue;
            }
            let mut failed = false;
            for block in &rule.cidrs {
                if cidr::is_public(block.as_str()) && cidr::count_addresses(block.as_str()) > 1 {
                    failed = true;
                    results.add("Network ACL rule allows ingress from public internet.", block);
                }
            }
            if !failed {
                results.add_passed(&rule.metadata);
            }
        }
    }
    results
}
