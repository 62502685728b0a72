use crate::adapters::{AdaptFn, Adapted};
use crate::block::{Block, BlockRef};
use crate::providers::azure::monitor::{LogProfile, RetentionPolicy};

pub(crate) const ADAPTERS: &[(&str, AdaptFn)] = &[("azurerm_monitor_log_profile", log_profile)];

fn log_profile(block: &Block) -> Adapted {
    Adapted::LogProfile(adapt_log_profile(block.view()))
}

/// `azurerm_monitor_log_profile`. Retention is disabled with zero days when
/// `retention_policy` is missing.
pub fn adapt_log_profile(resource: BlockRef<'_>) -> LogProfile {
    let retention = resource.get_block("retention_policy");
    LogProfile {
        metadata: resource.metadata(),
        categories: resource
            .get_attribute("categories")
            .as_string_values_or_default(&[], resource),
        retention_policy: RetentionPolicy {
            metadata: retention.metadata(),
            enabled: retention
                .get_attribute("enabled")
                .as_bool_or_default(false, retention),
            days: retention.get_attribute("days").as_int_or_default(0, retention),
        },
    }
}
