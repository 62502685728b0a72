use crate::adapters::{target, AdaptFn, Adapted, Parent};
use crate::block::{Block, BlockRef};
use crate::providers::google::gke::{Cluster, Management, NodePool};
use crate::types::{Metadata, StringValue};

pub(crate) const ADAPTERS: &[(&str, AdaptFn)] = &[
    ("google_container_cluster", cluster),
    ("google_container_node_pool", node_pool),
];

fn cluster(block: &Block) -> Adapted {
    Adapted::GkeCluster(adapt_cluster(block.view()))
}

fn node_pool(block: &Block) -> Adapted {
    let resource = block.view();
    Adapted::NodePool {
        cluster: target(resource, "cluster"),
        pool: adapt_node_pool(resource),
    }
}

/// `google_container_cluster` with inline `node_pool` blocks.
pub fn adapt_cluster(resource: BlockRef<'_>) -> Cluster {
    Cluster {
        metadata: resource.metadata(),
        name: resource.get_attribute("name").as_string_or_default("", resource),
        node_pools: resource
            .get_blocks("node_pool")
            .into_iter()
            .map(adapt_node_pool)
            .collect(),
    }
}

/// An inline `node_pool` block or a `google_container_node_pool` resource.
/// Auto-repair and auto-upgrade are on unless turned off.
pub fn adapt_node_pool(pool: BlockRef<'_>) -> NodePool {
    let management = pool.get_block("management");
    NodePool {
        metadata: pool.metadata(),
        management: Management {
            metadata: management.metadata(),
            enable_auto_repair: management
                .get_attribute("auto_repair")
                .as_bool_or_default(true, management),
            enable_auto_upgrade: management
                .get_attribute("auto_upgrade")
                .as_bool_or_default(true, management),
        },
    }
}

impl Parent for Cluster {
    type Child = NodePool;

    fn reference(&self) -> &str {
        self.metadata.reference()
    }

    fn attach(&mut self, pool: NodePool) {
        self.node_pools.push(pool);
    }

    fn placeholder() -> Self {
        let metadata = Metadata::unmanaged();
        Cluster {
            name: StringValue::new_default(String::new(), &metadata),
            node_pools: Vec::new(),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Module;
    use crate::types::Range;

    #[test]
    fn node_pool_without_management_block() {
        let module = Module::root(vec![Block::resource("google_container_node_pool", "pool")
            .with_range(Range::new("gke.tf", 20, 30))]);
        let pool = adapt_node_pool(module.blocks()[0].view());
        assert!(pool.management.enable_auto_repair.is_true());
        assert!(pool.management.enable_auto_repair.is_default());
        assert!(pool.management.enable_auto_upgrade.is_true());
        assert!(pool.management.metadata.is_default());
        assert_eq!(
            pool.management.enable_auto_repair.metadata().range(),
            Some(&Range::new("gke.tf", 20, 30))
        );
    }

    #[test]
    fn explicit_management_override() {
        let module = Module::root(vec![Block::resource("google_container_node_pool", "pool")
            .with_block(Block::nested("management").with_attribute("auto_repair", false))]);
        let pool = adapt_node_pool(module.blocks()[0].view());
        assert!(pool.management.enable_auto_repair.is_false());
        assert!(pool.management.enable_auto_repair.is_explicit());
        assert!(pool.management.enable_auto_upgrade.is_true());
        assert!(pool.management.enable_auto_upgrade.is_default());
    }

    #[test]
    fn cluster_collects_inline_pools() {
        let module = Module::root(vec![Block::resource("google_container_cluster", "primary")
            .with_attribute("name", "primary")
            .with_block(Block::nested("node_pool"))
            .with_block(
                Block::nested("node_pool")
                    .with_block(Block::nested("management").with_attribute("auto_upgrade", false)),
            )]);
        let cluster = adapt_cluster(module.blocks()[0].view());
        assert!(cluster.name.equal_to("primary"));
        assert_eq!(cluster.node_pools.len(), 2);
        assert!(cluster.node_pools[1].management.enable_auto_upgrade.is_false());
    }
}
