use crate::adapters::{target, AdaptFn, Adapted, Parent};
use crate::block::{Block, BlockRef};
use crate::providers::azure::storage::{Account, NetworkRule, BYPASS_AZURE_SERVICES};
use crate::types::{BoolValue, Metadata, StringValue};

pub(crate) const ADAPTERS: &[(&str, AdaptFn)] = &[
    ("azurerm_storage_account", account),
    ("azurerm_storage_account_network_rules", network_rules),
];

fn account(block: &Block) -> Adapted {
    Adapted::StorageAccount(adapt_account(block.view()))
}

fn network_rules(block: &Block) -> Adapted {
    let resource = block.view();
    Adapted::StorageNetworkRule {
        account: target(resource, "storage_account_id")
            .or_else(|| target(resource, "storage_account_name")),
        rule: adapt_network_rule(resource),
    }
}

/// `azurerm_storage_account` with an optional inline `network_rules` block.
/// HTTPS-only traffic is on unless disabled under either attribute name.
pub fn adapt_account(resource: BlockRef<'_>) -> Account {
    let legacy = resource.get_attribute("enable_https_traffic_only");
    let enforce_https = if legacy.is_present() {
        legacy.as_bool_or_default(true, resource)
    } else {
        resource
            .get_attribute("https_traffic_only_enabled")
            .as_bool_or_default(true, resource)
    };

    let inline = resource.get_block("network_rules");
    let network_rules = if inline.is_present() {
        vec![adapt_network_rule(inline)]
    } else {
        Vec::new()
    };

    Account {
        metadata: resource.metadata(),
        name: resource.get_attribute("name").as_string_or_default("", resource),
        enforce_https,
        network_rules,
    }
}

/// Inline `network_rules` block or `azurerm_storage_account_network_rules`.
/// Traffic is allowed by default and Azure services bypass the rules unless
/// configured otherwise.
pub fn adapt_network_rule(rules: BlockRef<'_>) -> NetworkRule {
    let action = rules
        .get_attribute("default_action")
        .as_string_or_default("Allow", rules);
    NetworkRule {
        metadata: rules.metadata(),
        allow_by_default: BoolValue::new(
            action.equal_to_ignore_case("Allow"),
            action.metadata().clone(),
        ),
        bypass: rules
            .get_attribute("bypass")
            .as_string_values_or_default(&[BYPASS_AZURE_SERVICES], rules),
    }
}

impl Parent for Account {
    type Child = NetworkRule;

    fn reference(&self) -> &str {
        self.metadata.reference()
    }

    fn attach(&mut self, rule: NetworkRule) {
        self.network_rules.push(rule);
    }

    fn placeholder() -> Self {
        let metadata = Metadata::unmanaged();
        Account {
            name: StringValue::new_default(String::new(), &metadata),
            enforce_https: BoolValue::new_default(true, &metadata),
            network_rules: Vec::new(),
            metadata,
        }
    }
}
