use super::{is_reference_to, AttrValue, Attribute, Block};
use crate::types::{BoolValue, IntValue, Metadata, StringValue, Value};

/// A block that may or may not exist in source.
///
/// `Absent` remembers the nearest enclosing block that *was* present, so a
/// chain like `resource.get_block("a").get_block("b").get_attribute("c")`
/// never needs a null check and defaults still point at a real location.
#[derive(Debug, Clone, Copy)]
pub enum BlockRef<'a> {
    Present(&'a Block),
    Absent { scope: Option<&'a Block> },
}

impl<'a> BlockRef<'a> {
    pub fn absent() -> Self {
        Self::Absent { scope: None }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        !self.is_present()
    }

    pub fn block(&self) -> Option<&'a Block> {
        match *self {
            Self::Present(block) => Some(block),
            Self::Absent { .. } => None,
        }
    }

    fn scope(&self) -> Option<&'a Block> {
        match *self {
            Self::Present(block) => Some(block),
            Self::Absent { scope } => scope,
        }
    }

    /// First nested block with this name. Repeated blocks resolve first-wins.
    pub fn get_block(&self, name: &str) -> BlockRef<'a> {
        match *self {
            Self::Present(block) => block
                .blocks
                .iter()
                .find(|child| child.block_type == name)
                .map(BlockRef::Present)
                .unwrap_or(BlockRef::Absent { scope: Some(block) }),
            Self::Absent { scope } => BlockRef::Absent { scope },
        }
    }

    /// All nested blocks with this name, in source order.
    pub fn get_blocks(&self, name: &str) -> Vec<BlockRef<'a>> {
        match *self {
            Self::Present(block) => block
                .blocks
                .iter()
                .filter(|child| child.block_type == name)
                .map(BlockRef::Present)
                .collect(),
            Self::Absent { .. } => Vec::new(),
        }
    }

    pub fn get_attribute(&self, name: &str) -> AttributeRef<'a> {
        match *self {
            Self::Present(block) => match block.attributes.get_key_value(name) {
                Some((key, attribute)) => AttributeRef::Present {
                    name: key.as_str(),
                    attribute,
                    owner: block,
                },
                None => AttributeRef::Absent,
            },
            Self::Absent { .. } => AttributeRef::Absent,
        }
    }

    /// Whether a nested block or an attribute of this name exists.
    pub fn has_child(&self, name: &str) -> bool {
        match *self {
            Self::Present(block) => {
                block.attributes.contains_key(name)
                    || block.blocks.iter().any(|child| child.block_type == name)
            }
            Self::Absent { .. } => false,
        }
    }

    /// Explicit metadata when present; otherwise the enclosing block's
    /// location tagged as a default.
    pub fn metadata(&self) -> Metadata {
        match *self {
            Self::Present(block) => block.metadata(),
            Self::Absent { .. } => self
                .scope()
                .map(|scope| scope.metadata().as_default())
                .unwrap_or_else(Metadata::synthetic),
        }
    }
}

impl<'a> From<&'a Block> for BlockRef<'a> {
    fn from(block: &'a Block) -> Self {
        Self::Present(block)
    }
}

/// An attribute lookup result. Absence is a value, not an error.
#[derive(Debug, Clone, Copy)]
pub enum AttributeRef<'a> {
    Present {
        name: &'a str,
        attribute: &'a Attribute,
        owner: &'a Block,
    },
    Absent,
}

impl<'a> AttributeRef<'a> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }

    pub fn is_absent(&self) -> bool {
        !self.is_present()
    }

    pub fn value(&self) -> Option<&'a AttrValue> {
        match *self {
            Self::Present { attribute, .. } => Some(&attribute.value),
            Self::Absent => None,
        }
    }

    /// Source metadata of the attribute itself.
    pub fn metadata(&self) -> Option<Metadata> {
        match *self {
            Self::Present {
                name,
                attribute,
                owner,
            } => Some(Metadata::new(
                attribute.range.clone().or_else(|| owner.range.clone()),
                format!("{}.{}", owner.reference(), name),
            )),
            Self::Absent => None,
        }
    }

    pub fn as_bool_or_default(&self, default: bool, scope: BlockRef<'_>) -> BoolValue {
        self.resolve(AttrValue::as_bool, default, scope)
    }

    pub fn as_string_or_default(&self, default: &str, scope: BlockRef<'_>) -> StringValue {
        self.resolve(AttrValue::as_string, default.to_string(), scope)
    }

    pub fn as_int_or_default(&self, default: i64, scope: BlockRef<'_>) -> IntValue {
        self.resolve(AttrValue::as_int, default, scope)
    }

    /// Each element carries the attribute's metadata; defaults carry the
    /// scope's metadata.
    pub fn as_string_values_or_default(
        &self,
        default: &[&str],
        scope: BlockRef<'_>,
    ) -> Vec<StringValue> {
        match (self.value().and_then(AttrValue::as_strings), self.metadata()) {
            (Some(items), Some(meta)) => items
                .into_iter()
                .map(|item| Value::new(item, meta.clone()))
                .collect(),
            _ => {
                let scope_meta = scope.metadata();
                default
                    .iter()
                    .map(|item| Value::new_default(item.to_string(), &scope_meta))
                    .collect()
            }
        }
    }

    /// Whether this attribute holds a reference expression pointing at `target`.
    pub fn references(&self, target: &Block) -> bool {
        self.value()
            .and_then(AttrValue::as_string)
            .is_some_and(|expr| is_reference_to(&expr, target.reference()))
    }

    fn resolve<T>(
        &self,
        convert: impl Fn(&AttrValue) -> Option<T>,
        default: T,
        scope: BlockRef<'_>,
    ) -> Value<T> {
        match (self.value().and_then(convert), self.metadata()) {
            (Some(v), Some(meta)) => Value::new(v, meta),
            _ => Value::new_default(default, &scope.metadata()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Module;
    use crate::types::Range;

    fn module() -> Module {
        Module::root(vec![Block::resource("aws_msk_cluster", "example")
            .with_range(Range::new("main.tf", 1, 20))
            .with_block(
                Block::nested("logging_info")
                    .with_range(Range::new("main.tf", 5, 15))
                    .with_block(
                        Block::nested("broker_logs")
                            .with_range(Range::new("main.tf", 6, 14))
                            .with_block(
                                Block::nested("s3")
                                    .with_range(Range::new("main.tf", 7, 9))
                                    .with_attribute_at("enabled", true, Range::new("main.tf", 8, 8)),
                            ),
                    ),
            )])
    }

    #[test]
    fn chained_lookup_through_absent_blocks() {
        let module = module();
        let resource = module.blocks()[0].view();
        let missing = resource.get_block("encryption_info").get_block("encryption_in_transit");
        assert!(missing.is_absent());
        assert!(missing.get_attribute("client_broker").is_absent());

        let value = missing
            .get_attribute("client_broker")
            .as_string_or_default("TLS_PLAINTEXT", missing);
        assert!(value.equal_to("TLS_PLAINTEXT"));
        assert!(value.is_default());
        // Scoped to the resource, the nearest block that exists.
        assert_eq!(value.metadata().range(), Some(&Range::new("main.tf", 1, 20)));
    }

    #[test]
    fn explicit_attribute_keeps_its_location() {
        let module = module();
        let s3 = module.blocks()[0]
            .view()
            .get_block("logging_info")
            .get_block("broker_logs")
            .get_block("s3");
        let enabled = s3.get_attribute("enabled").as_bool_or_default(false, s3);
        assert!(enabled.is_true());
        assert!(enabled.is_explicit());
        assert_eq!(enabled.metadata().range(), Some(&Range::new("main.tf", 8, 8)));
        assert_eq!(
            enabled.metadata().reference(),
            "aws_msk_cluster.example.logging_info.broker_logs.s3.enabled"
        );
    }

    #[test]
    fn default_scoped_to_nearest_present_block() {
        let module = module();
        let broker = module.blocks()[0]
            .view()
            .get_block("logging_info")
            .get_block("broker_logs");
        let firehose = broker.get_block("firehose");
        let enabled = firehose
            .get_attribute("enabled")
            .as_bool_or_default(false, firehose);
        assert!(enabled.is_false());
        assert!(enabled.is_default());
        assert_eq!(enabled.metadata().range(), Some(&Range::new("main.tf", 6, 14)));
    }

    #[test]
    fn malformed_value_falls_back_to_default() {
        let module = Module::root(vec![
            Block::resource("github_repository", "r").with_attribute("private", "sometimes")
        ]);
        let repo = module.blocks()[0].view();
        let private = repo.get_attribute("private").as_bool_or_default(false, repo);
        assert!(private.is_false());
        assert!(private.is_default());
    }

    #[test]
    fn has_child_and_repeated_blocks() {
        let module = Module::root(vec![Block::resource("aws_network_acl", "main")
            .with_attribute("vpc_id", "vpc-1")
            .with_block(Block::nested("ingress").with_attribute("rule_no", 100))
            .with_block(Block::nested("ingress").with_attribute("rule_no", 200))]);
        let acl = module.blocks()[0].view();
        assert!(acl.has_child("ingress"));
        assert!(acl.has_child("vpc_id"));
        assert!(!acl.has_child("egress"));
        assert_eq!(acl.get_blocks("ingress").len(), 2);
        assert!(acl.get_blocks("egress").is_empty());
        let first = acl.get_block("ingress");
        assert_eq!(
            first.get_attribute("rule_no").as_int_or_default(0, first).value(),
            &100
        );
    }

    #[test]
    fn absent_root_uses_synthetic_metadata() {
        let nil = BlockRef::absent();
        assert!(nil.get_block("x").is_absent());
        let meta = nil.metadata();
        assert!(meta.is_default());
        assert!(meta.range().is_none());
    }

    #[test]
    fn string_values_default_per_element() {
        let module = Module::root(vec![Block::resource("azurerm_storage_account", "s")
            .with_block(Block::nested("network_rules"))]);
        let rules = module.blocks()[0].view().get_block("network_rules");
        let bypass = rules
            .get_attribute("bypass")
            .as_string_values_or_default(&["AzureServices"], rules);
        assert_eq!(bypass.len(), 1);
        assert!(bypass[0].equal_to("AzureServices"));
        assert!(bypass[0].is_default());
    }
}
