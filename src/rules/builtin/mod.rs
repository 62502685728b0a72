mod api_gateway_cache_encryption;
mod functionapp_authentication;
mod github_private;
mod github_vulnerability_alerts;
mod gke_auto_repair;
mod gke_auto_upgrade;
mod monitor_log_retention;
mod msk_in_transit_encryption;
mod msk_logging;
mod storage_default_action_deny;
mod storage_enforce_https;
mod storage_service_bypass;
mod vpc_group_description;
mod vpc_group_rule_description;
mod vpc_public_ingress_acl;
mod vpc_public_ingress_sgr;

use crate::error::Result;

use super::{Check, Registry};

/// Every built-in check, in catalog order.
pub fn all_checks() -> Vec<Check> {
    vec![
        api_gateway_cache_encryption::CHECK,
        msk_in_transit_encryption::CHECK,
        msk_logging::CHECK,
        vpc_public_ingress_acl::CHECK,
        vpc_public_ingress_sgr::CHECK,
        vpc_group_description::CHECK,
        vpc_group_rule_description::CHECK,
        gke_auto_repair::CHECK,
        gke_auto_upgrade::CHECK,
        github_private::CHECK,
        github_vulnerability_alerts::CHECK,
        storage_default_action_deny::CHECK,
        storage_service_bypass::CHECK,
        storage_enforce_https::CHECK,
        monitor_log_retention::CHECK,
        functionapp_authentication::CHECK,
    ]
}

/// Registry holding the built-in catalog. Fails on the first duplicate.
pub fn registry() -> Result<Registry> {
    let mut registry = Registry::new();
    for check in all_checks() {
        registry.register(check)?;
    }
    tracing::debug!(rules = registry.len(), "built-in rules registered");
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::adapters::aws::{apigateway, msk};
    use crate::adapters::Parent;
    use crate::block::BlockRef;
    use crate::providers::aws::apigateway::Api;
    use crate::providers::aws::vpc::{NetworkAcl, SecurityGroup};
    use crate::providers::azure::storage::Account;
    use crate::providers::google::gke::Cluster as GkeCluster;
    use crate::providers::State;
    use crate::types::Metadata;

    #[test]
    fn catalog_registers_without_duplicates() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), all_checks().len());
        assert!(registry.duplicate_ids().is_empty());

        let ids: HashSet<_> = registry.all().iter().map(|c| c.rule.id).collect();
        assert_eq!(ids.len(), registry.len());
    }

    #[test]
    fn descriptors_are_complete() {
        for check in all_checks() {
            let rule = &check.rule;
            assert!(rule.id.starts_with("AVD-"), "{}", rule.id);
            assert!(!rule.summary.is_empty(), "{}", rule.id);
            assert!(!rule.resolution.is_empty(), "{}", rule.id);
            assert!(
                rule.long_id().starts_with(&rule.provider.to_string()),
                "{}",
                rule.long_id()
            );
        }
    }

    #[test]
    fn registering_the_catalog_twice_fails() {
        let mut registry = registry().unwrap();
        assert!(registry.register(all_checks().remove(0)).is_err());
    }

    #[test]
    fn unmanaged_only_state_yields_no_results() {
        let mut state = State::default();
        let mut api = Api::placeholder();
        let mut stage = apigateway::adapt_rest_stage(BlockRef::absent());
        stage.metadata = Metadata::unmanaged();
        api.stages.push(stage);
        state.aws.apigateway.apis.push(api);
        state.aws.vpc.network_acls.push(NetworkAcl::placeholder());
        state.aws.vpc.security_groups.push(SecurityGroup::placeholder());
        state.google.gke.clusters.push(GkeCluster::placeholder());
        state.azure.storage.accounts.push(Account::placeholder());

        let mut cluster = msk::adapt_cluster(BlockRef::absent());
        cluster.metadata = Metadata::unmanaged();
        state.aws.msk.clusters.push(cluster);

        for check in all_checks() {
            assert!(check.run(&state).is_empty(), "{}", check.rule.id);
        }
    }
}
