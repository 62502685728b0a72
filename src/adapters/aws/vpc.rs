use crate::adapters::{target, AdaptFn, Adapted, Parent};
use crate::block::{Block, BlockRef};
use crate::providers::aws::vpc::{
    NetworkAcl, NetworkAclRule, SecurityGroup, SecurityGroupRule,
    DEFAULT_SECURITY_GROUP_DESCRIPTION, TYPE_EGRESS, TYPE_INGRESS,
};
use crate::types::{Metadata, StringValue};

pub(crate) const ADAPTERS: &[(&str, AdaptFn)] = &[
    ("aws_network_acl", network_acl),
    ("aws_network_acl_rule", network_acl_rule),
    ("aws_security_group", security_group),
    ("aws_security_group_rule", security_group_rule),
];

/// A standalone security group rule and the side of the group it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectedRule {
    pub ingress: bool,
    pub rule: SecurityGroupRule,
}

fn network_acl(block: &Block) -> Adapted {
    Adapted::NetworkAcl(adapt_network_acl(block.view()))
}

fn network_acl_rule(block: &Block) -> Adapted {
    let resource = block.view();
    Adapted::NetworkAclRule {
        acl: target(resource, "network_acl_id"),
        rule: adapt_network_acl_rule(resource),
    }
}

fn security_group(block: &Block) -> Adapted {
    Adapted::SecurityGroup(adapt_security_group(block.view()))
}

fn security_group_rule(block: &Block) -> Adapted {
    let resource = block.view();
    Adapted::SecurityGroupRule {
        group: target(resource, "security_group_id"),
        rule: adapt_security_group_rule(resource),
    }
}

/// `aws_network_acl` with its inline `ingress`/`egress` blocks.
pub fn adapt_network_acl(resource: BlockRef<'_>) -> NetworkAcl {
    let ingress = resource
        .get_blocks("ingress")
        .into_iter()
        .map(|block| adapt_inline_acl_rule(block, TYPE_INGRESS));
    let egress = resource
        .get_blocks("egress")
        .into_iter()
        .map(|block| adapt_inline_acl_rule(block, TYPE_EGRESS));

    NetworkAcl {
        metadata: resource.metadata(),
        rules: ingress.chain(egress).collect(),
    }
}

fn adapt_inline_acl_rule(block: BlockRef<'_>, rule_type: &str) -> NetworkAclRule {
    let metadata = block.metadata();
    NetworkAclRule {
        // The block name itself states the direction.
        rule_type: StringValue::new(rule_type.into(), metadata.clone()),
        action: block.get_attribute("action").as_string_or_default("", block),
        cidrs: cidrs(block, "cidr_block", "ipv6_cidr_block"),
        metadata,
    }
}

/// `aws_network_acl_rule`: ingress unless `egress = true`.
pub fn adapt_network_acl_rule(resource: BlockRef<'_>) -> NetworkAclRule {
    let egress = resource
        .get_attribute("egress")
        .as_bool_or_default(false, resource);
    let rule_type = if egress.is_true() {
        TYPE_EGRESS
    } else {
        TYPE_INGRESS
    };

    NetworkAclRule {
        metadata: resource.metadata(),
        rule_type: StringValue::new(rule_type.into(), egress.metadata().clone()),
        action: resource
            .get_attribute("rule_action")
            .as_string_or_default("", resource),
        cidrs: cidrs(resource, "cidr_block", "ipv6_cidr_block"),
    }
}

/// `aws_security_group` with its inline rules.
pub fn adapt_security_group(resource: BlockRef<'_>) -> SecurityGroup {
    SecurityGroup {
        metadata: resource.metadata(),
        description: resource
            .get_attribute("description")
            .as_string_or_default(DEFAULT_SECURITY_GROUP_DESCRIPTION, resource),
        ingress_rules: resource
            .get_blocks("ingress")
            .into_iter()
            .map(adapt_group_rule)
            .collect(),
        egress_rules: resource
            .get_blocks("egress")
            .into_iter()
            .map(adapt_group_rule)
            .collect(),
    }
}

fn adapt_group_rule(block: BlockRef<'_>) -> SecurityGroupRule {
    SecurityGroupRule {
        metadata: block.metadata(),
        description: block
            .get_attribute("description")
            .as_string_or_default("", block),
        cidrs: cidrs(block, "cidr_blocks", "ipv6_cidr_blocks"),
    }
}

/// `aws_security_group_rule`; `type` decides the side, ingress by default.
pub fn adapt_security_group_rule(resource: BlockRef<'_>) -> DirectedRule {
    let rule_type = resource
        .get_attribute("type")
        .as_string_or_default(TYPE_INGRESS, resource);
    DirectedRule {
        ingress: !rule_type.equal_to_ignore_case(TYPE_EGRESS),
        rule: adapt_group_rule(resource),
    }
}

fn cidrs(block: BlockRef<'_>, v4: &str, v6: &str) -> Vec<StringValue> {
    let mut cidrs = block.get_attribute(v4).as_string_values_or_default(&[], block);
    cidrs.extend(block.get_attribute(v6).as_string_values_or_default(&[], block));
    cidrs
}

impl Parent for NetworkAcl {
    type Child = NetworkAclRule;

    fn reference(&self) -> &str {
        self.metadata.reference()
    }

    fn attach(&mut self, rule: NetworkAclRule) {
        self.rules.push(rule);
    }

    fn placeholder() -> Self {
        NetworkAcl {
            metadata: Metadata::unmanaged(),
            rules: Vec::new(),
        }
    }
}

impl Parent for SecurityGroup {
    type Child = DirectedRule;

    fn reference(&self) -> &str {
        self.metadata.reference()
    }

    fn attach(&mut self, directed: DirectedRule) {
        if directed.ingress {
            self.ingress_rules.push(directed.rule);
        } else {
            self.egress_rules.push(directed.rule);
        }
    }

    fn placeholder() -> Self {
        let metadata = Metadata::unmanaged();
        SecurityGroup {
            description: StringValue::new_default(String::new(), &metadata),
            ingress_rules: Vec::new(),
            egress_rules: Vec::new(),
            metadata,
        }
    }
}
