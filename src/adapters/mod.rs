//! Adaptation from resolved configuration blocks into the typed [`State`].
//!
//! Every adapter is a pure function of one block. The aggregator looks the
//! resource kind up in an [`AdapterTable`], collects what each adapter
//! returns, and links child resources (stages, ACL rules, node pools, ...)
//! to the parents they reference within the same module.

pub mod aws;
pub mod azure;
pub mod github;
pub mod google;

use std::collections::{HashMap, HashSet};

use crate::block::{is_reference_to, Block, BlockRef, Module};
use crate::providers::aws::apigateway::{Api, RestMethodSettings, Stage};
use crate::providers::aws::msk;
use crate::providers::aws::vpc::{NetworkAcl, NetworkAclRule, SecurityGroup};
use crate::providers::azure::appservice::FunctionApp;
use crate::providers::azure::monitor::LogProfile;
use crate::providers::azure::storage::{Account, NetworkRule};
use crate::providers::github::Repository;
use crate::providers::google::gke;
use crate::providers::State;

/// Output of a single adapter call. Child resources carry the reference
/// expression that names their parent.
#[derive(Debug, Clone, PartialEq)]
pub enum Adapted {
    Api(Api),
    Stage {
        api: Option<String>,
        stage: Stage,
    },
    MethodSettings {
        api: Option<String>,
        stage_name: String,
        settings: RestMethodSettings,
    },
    MskCluster(msk::Cluster),
    NetworkAcl(NetworkAcl),
    NetworkAclRule {
        acl: Option<String>,
        rule: NetworkAclRule,
    },
    SecurityGroup(SecurityGroup),
    SecurityGroupRule {
        group: Option<String>,
        rule: aws::vpc::DirectedRule,
    },
    GkeCluster(gke::Cluster),
    NodePool {
        cluster: Option<String>,
        pool: gke::NodePool,
    },
    Repository(Repository),
    StorageAccount(Account),
    StorageNetworkRule {
        account: Option<String>,
        rule: NetworkRule,
    },
    LogProfile(LogProfile),
    FunctionApp(FunctionApp),
}

pub type AdaptFn = fn(&Block) -> Adapted;

/// Resource kind → adapter. Kinds not in the table are skipped.
pub struct AdapterTable {
    adapters: HashMap<&'static str, AdaptFn>,
}

impl AdapterTable {
    pub fn new() -> Self {
        let adapters = [
            aws::apigateway::ADAPTERS,
            aws::msk::ADAPTERS,
            aws::vpc::ADAPTERS,
            azure::appservice::ADAPTERS,
            azure::monitor::ADAPTERS,
            azure::storage::ADAPTERS,
            github::ADAPTERS,
            google::gke::ADAPTERS,
        ]
        .into_iter()
        .flatten()
        .copied()
        .collect();
        Self { adapters }
    }

    pub fn get(&self, kind: &str) -> Option<AdaptFn> {
        self.adapters.get(kind).copied()
    }

    /// Supported resource kinds, sorted.
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.adapters.keys().copied().collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for AdapterTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapt every module with the built-in adapter table.
pub fn adapt(modules: &[Module]) -> State {
    adapt_with(&AdapterTable::new(), modules)
}

pub fn adapt_with(table: &AdapterTable, modules: &[Module]) -> State {
    let mut state = State::default();

    for module in modules {
        let _span = tracing::debug_span!("adapt_module", module = module.path()).entered();
        let mut assembly = Assembly::default();
        let mut skipped = 0usize;

        for block in module.resources() {
            let Some(kind) = block.kind() else {
                continue;
            };
            match table.get(kind) {
                Some(adapter) => assembly.push(adapter(block)),
                None => {
                    skipped += 1;
                    tracing::trace!(kind, "no adapter for resource kind, skipping");
                }
            }
        }

        let adapted = assembly.finish();
        tracing::debug!(
            entities = adapted.total_entities(),
            skipped,
            "module adapted"
        );
        state.extend(adapted);
    }

    state
}

/// Reference expression held by `attribute`, if any.
pub(crate) fn target(resource: BlockRef<'_>, attribute: &str) -> Option<String> {
    resource
        .get_attribute(attribute)
        .value()
        .and_then(|v| v.as_string())
}

/// An entity that owns child entities declared as separate resources.
pub(crate) trait Parent: Sized {
    type Child;

    fn reference(&self) -> &str;

    fn attach(&mut self, child: Self::Child);

    /// Unmanaged holder for children whose parent is not in the module.
    fn placeholder() -> Self;
}

struct Pending<C> {
    target: Option<String>,
    child: C,
}

fn link<P: Parent>(parents: &mut Vec<P>, pending: Vec<Pending<P::Child>>) {
    let mut orphans = Vec::new();

    for Pending { target, child } in pending {
        let parent = target.as_deref().and_then(|expr| {
            parents
                .iter_mut()
                .find(|p| is_reference_to(expr, p.reference()))
        });
        match parent {
            Some(parent) => parent.attach(child),
            None => orphans.push(child),
        }
    }

    if !orphans.is_empty() {
        tracing::debug!(count = orphans.len(), "children without parent in module");
        let mut holder = P::placeholder();
        for child in orphans {
            holder.attach(child);
        }
        parents.push(holder);
    }
}

struct PendingSettings {
    api: Option<String>,
    stage_name: String,
    settings: RestMethodSettings,
}

/// Per-module accumulator.
#[derive(Default)]
struct Assembly {
    state: State,
    stages: Vec<Pending<Stage>>,
    method_settings: Vec<PendingSettings>,
    acl_rules: Vec<Pending<NetworkAclRule>>,
    group_rules: Vec<Pending<aws::vpc::DirectedRule>>,
    node_pools: Vec<Pending<gke::NodePool>>,
    storage_rules: Vec<Pending<NetworkRule>>,
}

impl Assembly {
    fn push(&mut self, adapted: Adapted) {
        match adapted {
            Adapted::Api(api) => self.state.aws.apigateway.apis.push(api),
            Adapted::Stage { api, stage } => self.stages.push(Pending {
                target: api,
                child: stage,
            }),
            Adapted::MethodSettings {
                api,
                stage_name,
                settings,
            } => self.method_settings.push(PendingSettings {
                api,
                stage_name,
                settings,
            }),
            Adapted::MskCluster(cluster) => self.state.aws.msk.clusters.push(cluster),
            Adapted::NetworkAcl(acl) => self.state.aws.vpc.network_acls.push(acl),
            Adapted::NetworkAclRule { acl, rule } => self.acl_rules.push(Pending {
                target: acl,
                child: rule,
            }),
            Adapted::SecurityGroup(group) => self.state.aws.vpc.security_groups.push(group),
            Adapted::SecurityGroupRule { group, rule } => self.group_rules.push(Pending {
                target: group,
                child: rule,
            }),
            Adapted::GkeCluster(cluster) => self.state.google.gke.clusters.push(cluster),
            Adapted::NodePool { cluster, pool } => self.node_pools.push(Pending {
                target: cluster,
                child: pool,
            }),
            Adapted::Repository(repo) => self.state.github.repositories.push(repo),
            Adapted::StorageAccount(account) => self.state.azure.storage.accounts.push(account),
            Adapted::StorageNetworkRule { account, rule } => self.storage_rules.push(Pending {
                target: account,
                child: rule,
            }),
            Adapted::LogProfile(profile) => self.state.azure.monitor.log_profiles.push(profile),
            Adapted::FunctionApp(app) => self.state.azure.appservice.function_apps.push(app),
        }
    }

    fn finish(mut self) -> State {
        link(&mut self.state.aws.apigateway.apis, self.stages);
        link(&mut self.state.aws.vpc.network_acls, self.acl_rules);
        link(&mut self.state.aws.vpc.security_groups, self.group_rules);
        link(&mut self.state.google.gke.clusters, self.node_pools);
        link(&mut self.state.azure.storage.accounts, self.storage_rules);

        // First matching method settings resource wins per stage.
        let mut configured: HashSet<String> = HashSet::new();
        for pending in self.method_settings {
            let Some(api_expr) = pending.api.as_deref() else {
                continue;
            };
            if pending.stage_name.is_empty() {
                tracing::debug!(api = api_expr, "method settings without stage name");
                continue;
            }
            let stage = self
                .state
                .aws
                .apigateway
                .apis
                .iter_mut()
                .filter(|api| is_reference_to(api_expr, api.reference()))
                .flat_map(|api| api.stages.iter_mut())
                .find(|stage| {
                    stage.name.equal_to(&pending.stage_name)
                        || is_reference_to(&pending.stage_name, stage.metadata.reference())
                });
            match stage {
                Some(stage) => {
                    if configured.insert(stage.metadata.reference().to_string()) {
                        stage.rest_method_settings = pending.settings;
                    }
                }
                None => tracing::debug!(
                    stage = %pending.stage_name,
                    "method settings without matching stage"
                ),
            }
        }

        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Block;

    #[test]
    fn unknown_kinds_are_skipped() {
        let modules = vec![Module::root(vec![
            Block::resource("aws_kinesis_stream", "s"),
            Block::resource("github_repository", "r").with_attribute("private", true),
        ])];
        let state = adapt(&modules);
        assert_eq!(state.github.repositories.len(), 1);
        assert_eq!(state.total_entities(), 1);
    }

    #[test]
    fn entities_follow_module_then_encounter_order() {
        let modules = vec![
            Module::root(vec![
                Block::resource("github_repository", "a"),
                Block::resource("github_repository", "b"),
            ]),
            Module::new(
                "module.extra",
                vec![Block::resource("github_repository", "c")],
            ),
        ];
        let state = adapt(&modules);
        let refs: Vec<_> = state
            .github
            .repositories
            .iter()
            .map(|r| r.metadata.reference().to_string())
            .collect();
        assert_eq!(
            refs,
            vec![
                "github_repository.a",
                "github_repository.b",
                "github_repository.c"
            ]
        );
    }

    #[test]
    fn children_link_to_parent_regardless_of_order() {
        let modules = vec![Module::root(vec![
            Block::resource("aws_network_acl_rule", "r")
                .with_attribute("network_acl_id", "aws_network_acl.main.id")
                .with_attribute("rule_action", "allow")
                .with_attribute("cidr_block", "0.0.0.0/0"),
            Block::resource("aws_network_acl", "main"),
        ])];
        let state = adapt(&modules);
        let acls = &state.aws.vpc.network_acls;
        assert_eq!(acls.len(), 1);
        assert!(acls[0].metadata.is_managed());
        assert_eq!(acls[0].rules.len(), 1);
    }

    #[test]
    fn orphans_collect_under_unmanaged_placeholder() {
        let modules = vec![Module::root(vec![Block::resource(
            "google_container_node_pool",
            "pool",
        )
        .with_attribute("cluster", "google_container_cluster.elsewhere.id")])];
        let state = adapt(&modules);
        let clusters = &state.google.gke.clusters;
        assert_eq!(clusters.len(), 1);
        assert!(clusters[0].metadata.is_unmanaged());
        assert_eq!(clusters[0].node_pools.len(), 1);
        assert!(clusters[0].node_pools[0].metadata.is_managed());
    }

    #[test]
    fn references_do_not_cross_modules() {
        let modules = vec![
            Module::root(vec![Block::resource("aws_network_acl", "main")]),
            Module::new(
                "module.child",
                vec![Block::resource("aws_network_acl_rule", "r")
                    .with_attribute("network_acl_id", "aws_network_acl.main.id")],
            ),
        ];
        let state = adapt(&modules);
        let acls = &state.aws.vpc.network_acls;
        assert_eq!(acls.len(), 2);
        assert!(acls[0].rules.is_empty());
        assert!(acls[1].metadata.is_unmanaged());
    }

    #[test]
    fn method_settings_attach_to_named_stage() {
        let modules = vec![Module::root(vec![
            Block::resource("aws_api_gateway_rest_api", "api"),
            Block::resource("aws_api_gateway_stage", "prod")
                .with_attribute("rest_api_id", "aws_api_gateway_rest_api.api.id")
                .with_attribute("stage_name", "prod"),
            Block::resource("aws_api_gateway_method_settings", "all")
                .with_attribute("rest_api_id", "aws_api_gateway_rest_api.api.id")
                .with_attribute("stage_name", "aws_api_gateway_stage.prod.stage_name")
                .with_block(
                    Block::nested("settings")
                        .with_attribute("caching_enabled", true)
                        .with_attribute("cache_data_encrypted", true),
                ),
        ])];
        let state = adapt(&modules);
        let stage = &state.aws.apigateway.apis[0].stages[0];
        assert!(stage.rest_method_settings.cache_enabled.is_true());
        assert!(stage.rest_method_settings.cache_data_encrypted.is_explicit());
    }

    #[test]
    fn method_settings_without_stage_name_attach_nowhere() {
        let modules = vec![Module::root(vec![
            Block::resource("aws_api_gateway_rest_api", "api"),
            Block::resource("aws_api_gateway_stage", "unnamed")
                .with_attribute("rest_api_id", "aws_api_gateway_rest_api.api.id"),
            Block::resource("aws_api_gateway_method_settings", "all")
                .with_attribute("rest_api_id", "aws_api_gateway_rest_api.api.id")
                .with_block(
                    Block::nested("settings")
                        .with_attribute("caching_enabled", true)
                        .with_attribute("cache_data_encrypted", false),
                ),
        ])];
        let state = adapt(&modules);
        let stage = &state.aws.apigateway.apis[0].stages[0];
        assert!(stage.name.as_str().is_empty());
        assert!(stage.rest_method_settings.cache_enabled.is_false());
        assert!(stage.rest_method_settings.cache_enabled.is_default());
    }

    #[test]
    fn adapting_twice_is_structurally_equal() {
        let modules = vec![Module::root(vec![
            Block::resource("aws_msk_cluster", "c"),
            Block::resource("aws_security_group", "sg")
                .with_block(Block::nested("ingress").with_attribute("cidr_blocks", vec!["0.0.0.0/0"])),
            Block::resource("azurerm_storage_account", "s")
                .with_block(Block::nested("network_rules").with_attribute("default_action", "Deny")),
        ])];
        assert_eq!(adapt(&modules), adapt(&modules));
    }

    #[test]
    fn table_lists_kinds() {
        let table = AdapterTable::new();
        let kinds = table.kinds();
        assert!(kinds.contains(&"aws_msk_cluster"));
        assert!(kinds.contains(&"azurerm_monitor_log_profile"));
        assert!(table.get("aws_kinesis_stream").is_none());
    }
}
