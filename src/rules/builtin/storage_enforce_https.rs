use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AZU-0008
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AZU-0008",
        provider: Provider::Azure,
        service: "storage",
        short_code: "enforce-https",
        summary: "Storage accounts should be configured to only accept transfers that are over \
                  secure connections",
        impact: "Insecure transfer of data into secure accounts could be read if intercepted",
        resolution: "Only allow secure connection for transferring data into storage accounts",
        explanation: "You can configure your storage account to accept requests from secure \
                      connections only by setting the Secure transfer required property for the \
                      storage account.",
        links: &["https://docs.microsoft.com/en-us/azure/storage/common/storage-require-secure-transfer"],
        severity: Severity::High,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for account in &state.azure.storage.accounts {
        if account.metadata.is_unmanaged() {
            continue;
        }
        if account.enforce_https.is_false() {
            results.add("Account does not enforce HTTPS.", &account.enforce_https);
        } else {
            results.add_passed(&account.metadata);
        }
    }
    results
}
