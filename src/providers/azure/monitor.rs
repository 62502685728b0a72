use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, IntValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub log_profiles: Vec<LogProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogProfile {
    pub metadata: Metadata,
    pub categories: Vec<StringValue>,
    pub retention_policy: RetentionPolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    pub metadata: Metadata,
    pub enabled: BoolValue,
    pub days: IntValue,
}
