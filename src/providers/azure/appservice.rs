use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, Metadata, StringValue};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppService {
    pub function_apps: Vec<FunctionApp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionApp {
    pub metadata: Metadata,
    pub name: StringValue,
    pub https_only: BoolValue,
    pub authentication: Authentication,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authentication {
    pub metadata: Metadata,
    pub enabled: BoolValue,
}
