use serde::{Deserialize, Serialize};

use super::Metadata;

/// A value extracted from configuration, with its provenance.
///
/// Comparison helpers look at the underlying value only; a defaulted
/// `false` and an explicit `false` behave the same in a rule. Structural
/// equality (`PartialEq`) also compares metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value<T> {
    value: T,
    metadata: Metadata,
}

pub type BoolValue = Value<bool>;
pub type StringValue = Value<String>;
pub type IntValue = Value<i64>;

impl<T> Value<T> {
    /// Wrap a value with the metadata as given.
    pub fn new(value: T, metadata: Metadata) -> Self {
        Self { value, metadata }
    }

    /// Wrap a synthesized value; `scope` is the nearest block present in
    /// source and the result is always tagged as a default.
    pub fn new_default(value: T, scope: &Metadata) -> Self {
        Self {
            value,
            metadata: scope.as_default(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn is_default(&self) -> bool {
        self.metadata.is_default()
    }

    pub fn is_explicit(&self) -> bool {
        self.metadata.is_explicit()
    }
}

impl BoolValue {
    pub fn is_true(&self) -> bool {
        self.value
    }

    pub fn is_false(&self) -> bool {
        !self.value
    }
}

impl StringValue {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn equal_to(&self, other: &str) -> bool {
        self.value == other
    }

    pub fn not_equal_to(&self, other: &str) -> bool {
        !self.equal_to(other)
    }

    pub fn equal_to_ignore_case(&self, other: &str) -> bool {
        self.value.eq_ignore_ascii_case(other)
    }

    pub fn is_one_of(&self, options: &[&str]) -> bool {
        options.iter().any(|o| self.value == *o)
    }
}

impl IntValue {
    pub fn equal_to(&self, other: i64) -> bool {
        self.value == other
    }

    pub fn not_equal_to(&self, other: i64) -> bool {
        self.value != other
    }

    pub fn less_than(&self, other: i64) -> bool {
        self.value < other
    }

    pub fn greater_than(&self, other: i64) -> bool {
        self.value > other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons_ignore_provenance() {
        let meta = Metadata::test();
        let explicit = StringValue::new("TLS".into(), meta.clone());
        let defaulted = StringValue::new_default("TLS".into(), &meta);
        assert!(explicit.equal_to("TLS"));
        assert!(defaulted.equal_to("TLS"));
        assert!(defaulted.is_default());
        assert!(explicit.is_explicit());
        assert_ne!(explicit, defaulted);
    }

    #[test]
    fn int_ordering() {
        let days = IntValue::new(90, Metadata::test());
        assert!(days.less_than(365));
        assert!(!days.greater_than(365));
        assert!(days.not_equal_to(365));
    }

    #[test]
    fn string_helpers() {
        let action = StringValue::new("Allow".into(), Metadata::test());
        assert!(action.equal_to_ignore_case("allow"));
        assert!(action.is_one_of(&["Deny", "Allow"]));
        assert!(!action.is_empty());
    }
}
