//! Provider-agnostic view over the resolved configuration graph.
//!
//! The external parser hands over modules of blocks whose expressions are
//! already evaluated. Adapters never touch `Block` fields directly; they go
//! through [`BlockRef`] and [`AttributeRef`], which turn absence into a
//! value that can still be queried.

pub mod lookup;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Metadata, Range};

pub use lookup::{AttributeRef, BlockRef};

/// An evaluated attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<AttrValue>),
    Object(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    /// HCL-style conversion: `"true"`/`"false"` strings count as bools.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Self::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(format!("{}", *n as i64)),
            Self::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            Self::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Lists convert element-wise (nulls dropped); a scalar becomes a
    /// one-element list.
    pub fn as_strings(&self) -> Option<Vec<String>> {
        match self {
            Self::List(items) => items
                .iter()
                .filter(|v| !matches!(v, Self::Null))
                .map(Self::as_string)
                .collect(),
            Self::Null | Self::Object(_) => None,
            scalar => scalar.as_string().map(|s| vec![s]),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Number(v as f64)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

/// A single attribute inside a block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub value: AttrValue,
    #[serde(default)]
    pub range: Option<Range>,
}

/// A node in the configuration graph: `resource "kind" "name" { ... }` or
/// any nested block inside one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub range: Option<Range>,
    #[serde(default)]
    pub attributes: BTreeMap<String, Attribute>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    /// Address within the module, filled in by [`Module::new`].
    #[serde(skip)]
    reference: String,
}

impl Block {
    pub fn resource(kind: &str, name: &str) -> Self {
        Self {
            block_type: "resource".into(),
            labels: vec![kind.into(), name.into()],
            ..Default::default()
        }
    }

    pub fn nested(block_type: &str) -> Self {
        Self {
            block_type: block_type.into(),
            ..Default::default()
        }
    }

    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(
            name.into(),
            Attribute {
                value: value.into(),
                range: None,
            },
        );
        self
    }

    pub fn with_attribute_at(
        mut self,
        name: &str,
        value: impl Into<AttrValue>,
        range: Range,
    ) -> Self {
        self.attributes.insert(
            name.into(),
            Attribute {
                value: value.into(),
                range: Some(range),
            },
        );
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn is_resource(&self) -> bool {
        self.block_type == "resource"
    }

    /// Resource kind, e.g. `aws_msk_cluster`.
    pub fn kind(&self) -> Option<&str> {
        if self.is_resource() {
            self.labels.first().map(String::as_str)
        } else {
            None
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::new(self.range.clone(), self.reference.clone())
    }

    /// Enter the lookup API.
    pub fn view(&self) -> BlockRef<'_> {
        BlockRef::Present(self)
    }

    fn assign_references(&mut self, reference: String) {
        let mut seen: BTreeMap<String, usize> = BTreeMap::new();
        for child in &self.blocks {
            *seen.entry(child.block_type.clone()).or_default() += 1;
        }
        let mut index: BTreeMap<String, usize> = BTreeMap::new();
        for child in &mut self.blocks {
            let n = index.entry(child.block_type.clone()).or_default();
            let child_ref = if seen[&child.block_type] > 1 {
                format!("{}.{}[{}]", reference, child.block_type, n)
            } else {
                format!("{}.{}", reference, child.block_type)
            };
            *n += 1;
            child.assign_references(child_ref);
        }
        self.reference = reference;
    }

    fn top_level_reference(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.labels.len() + 1);
        if !self.is_resource() {
            parts.push(&self.block_type);
        }
        parts.extend(self.labels.iter().map(String::as_str));
        parts.join(".")
    }
}

/// One configuration module with its references resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    path: String,
    blocks: Vec<Block>,
}

impl Module {
    pub fn new(path: impl Into<String>, mut blocks: Vec<Block>) -> Self {
        for block in &mut blocks {
            let reference = block.top_level_reference();
            block.assign_references(reference);
        }
        Self {
            path: path.into(),
            blocks,
        }
    }

    pub fn root(blocks: Vec<Block>) -> Self {
        Self::new("root", blocks)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Resource blocks in encounter order.
    pub fn resources(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.is_resource())
    }

    pub fn resources_by_type<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Block> {
        self.resources().filter(move |b| b.kind() == Some(kind))
    }
}

/// Whether a reference expression such as `aws_network_acl.main.id` points
/// at the block addressed `aws_network_acl.main`.
pub fn is_reference_to(expr: &str, reference: &str) -> bool {
    if reference.is_empty() {
        return false;
    }
    match expr.strip_prefix(reference) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}
