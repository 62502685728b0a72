use serde::{Deserialize, Serialize};

use crate::types::{BoolValue, IntValue, Metadata, StringValue};

pub const PROTOCOL_TYPE_REST: &str = "REST";
pub const PROTOCOL_TYPE_HTTP: &str = "HTTP";
pub const PROTOCOL_TYPE_WEBSOCKET: &str = "WEBSOCKET";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiGateway {
    pub apis: Vec<Api>,
}

/// A REST (v1) or HTTP/WebSocket (v2) API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Api {
    pub metadata: Metadata,
    pub name: StringValue,
    pub version: IntValue,
    pub protocol_type: StringValue,
    pub stages: Vec<Stage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub metadata: Metadata,
    pub name: StringValue,
    pub version: IntValue,
    pub rest_method_settings: RestMethodSettings,
}

/// Method-level cache settings of a v1 stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestMethodSettings {
    pub metadata: Metadata,
    pub cache_enabled: BoolValue,
    pub cache_data_encrypted: BoolValue,
}

impl RestMethodSettings {
    /// Settings for a stage with no `aws_api_gateway_method_settings`.
    pub fn defaults_for(stage: &Metadata) -> Self {
        Self {
            metadata: stage.clone(),
            cache_enabled: BoolValue::new_default(false, stage),
            cache_data_encrypted: BoolValue::new_default(false, stage),
        }
    }
}
