use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

pub const BYPASS_AZURE_SERVICES: &str = "AzureServices";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub metadata: Metadata,
    pub name: StringValue,
    pub enforce_https: BoolValue,
    pub network_rules: Vec<NetworkRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRule {
    pub metadata: Metadata,
    /// `default_action = "Allow"`.
    pub allow_by_default: BoolValue,
    pub bypass: Vec<StringValue>,
}
