use serde::{Deserialize, Serialize};

use crate::types::{Metadata, StringValue};

pub const TYPE_INGRESS: &str = "ingress";
pub const TYPE_EGRESS: &str = "egress";
pub const ACTION_ALLOW: &str = "allow";
pub const ACTION_DENY: &str = "deny";

/// Description Terraform fills in when a security group has none.
pub const DEFAULT_SECURITY_GROUP_DESCRIPTION: &str = "Managed by Terraform";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vpc {
    pub network_acls: Vec<NetworkAcl>,
    pub security_groups: Vec<SecurityGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAcl {
    pub metadata: Metadata,
    pub rules: Vec<NetworkAclRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkAclRule {
    pub metadata: Metadata,
    /// `ingress` or `egress`.
    pub rule_type: StringValue,
    /// `allow` or `deny`.
    pub action: StringValue,
    pub cidrs: Vec<StringValue>,
}

impl NetworkAclRule {
    pub fn is_ingress(&self) -> bool {
        self.rule_type.equal_to(TYPE_INGRESS)
    }

    /// Exact match: the provider only accepts lowercase actions.
    pub fn is_allow(&self) -> bool {
        self.action.equal_to(ACTION_ALLOW)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroup {
    pub metadata: Metadata,
    pub description: StringValue,
    pub ingress_rules: Vec<SecurityGroupRule>,
    pub egress_rules: Vec<SecurityGroupRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityGroupRule {
    pub metadata: Metadata,
    pub description: StringValue,
    pub cidrs: Vec<StringValue>,
}
