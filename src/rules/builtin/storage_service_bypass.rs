use crate::providers::azure::storage::BYPASS_AZURE_SERVICES;
use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AZU-0010
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AZU-0010",
        provider: Provider::Azure,
        service: "storage",
        short_code: "allow-microsoft-service-bypass",
        summary: "Trusted Microsoft Services should have bypass access to Storage accounts",
        impact: "Trusted Microsoft Services won't be able to access storage account unless \
                 rules set to allow",
        resolution: "Allow Trusted Microsoft Services to bypass",
        explanation: "Some Microsoft services that interact with storage accounts operate from \
                      networks that can't be granted access through network rules. To help this \
                      type of service work as intended, allow the set of trusted Microsoft \
                      services to bypass the network rules.",
        links: &["https://docs.microsoft.com/en-us/azure/storage/common/storage-network-security#trusted-microsoft-services"],
        severity: Severity::High,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for account in &state.azure.storage.accounts {
        for rule in &account.network_rules {
            if rule.metadata.is_unmanaged() {
                continue;
            }
            if rule.bypass.iter().any(|b| b.equal_to(BYPASS_AZURE_SERVICES)) {
                results.add_passed(&rule.metadata);
            } else {
                results.add_at(
                    "Network rules do not allow bypass for Microsoft Services.",
                    &rule.metadata,
                );
            }
        }
    }
    results
}
