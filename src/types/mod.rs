//! Provenance-carrying primitives shared by the block layer, the adapted
//! state and the rule results.

pub mod metadata;
pub mod value;

pub use metadata::{Metadata, Provenance, Range};
pub use value::{BoolValue, IntValue, StringValue, Value};
