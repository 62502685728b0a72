use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gke {
    pub clusters: Vec<Cluster>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub metadata: Metadata,
    pub name: StringValue,
    pub node_pools: Vec<NodePool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePool {
    pub metadata: Metadata,
    pub management: Management,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Management {
    pub metadata: Metadata,
    pub enable_auto_repair: BoolValue,
    pub enable_auto_upgrade: BoolValue,
}
