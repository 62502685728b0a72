use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AZU-0012
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AZU-0012",
        provider: Provider::Azure,
        service: "storage",
        short_code: "default-action-deny",
        summary: "The default action on Storage account network rules should be set to deny",
        impact: "Network rules that allow could cause data to be exposed publicly",
        resolution: "Set network rules to deny",
        explanation: "The default_action for network rules should come into effect when no \
                      other rules are matched. The default action should be set to Deny.",
        links: &["https://docs.microsoft.com/en-us/azure/firewall/rule-processing"],
        severity: Severity::Critical,
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
            if rule.allow_by_default.is_true() {
                results.add("Network rules allow access by default.", &rule.allow_by_default);
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

    fn account(rules: Block) -> State {
        adapt(&[Module::root(vec![
            Block::resource("azurerm_storage_account", "s").with_block(rules)
        ])])
    }

    #[test]
    fn allow_by_default_fails() {
        let results = CHECK.run(&account(Block::nested("network_rules")));
        assert_eq!(results.failed().count(), 1);
    }

    #[test]
    fn deny_passes() {
        let results = CHECK.run(&account(
            Block::nested("network_rules").with_attribute("default_action", "Deny"),
        ));
        assert_eq!(results.passed().count(), 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn account_without_rules_is_not_inspected() {
        let state = adapt(&[Module::root(vec![Block::resource("azurerm_storage_account", "s")])]);
        assert!(CHECK.run(&state).is_empty());
    }
}
