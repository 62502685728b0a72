use crate::adapters::{target, AdaptFn, Adapted, Parent};
use crate::block::{Block, BlockRef};
use crate::providers::aws::apigateway::{Api, RestMethodSettings, Stage, PROTOCOL_TYPE_REST};
use crate::types::{IntValue, Metadata, StringValue};

pub(crate) const ADAPTERS: &[(&str, AdaptFn)] = &[
    ("aws_api_gateway_rest_api", rest_api),
    ("aws_api_gateway_stage", rest_stage),
    ("aws_api_gateway_method_settings", method_settings),
    ("aws_apigatewayv2_api", http_api),
    ("aws_apigatewayv2_stage", http_stage),
];

fn rest_api(block: &Block) -> Adapted {
    Adapted::Api(adapt_rest_api(block.view()))
}

fn http_api(block: &Block) -> Adapted {
    Adapted::Api(adapt_http_api(block.view()))
}

fn rest_stage(block: &Block) -> Adapted {
    let resource = block.view();
    Adapted::Stage {
        api: target(resource, "rest_api_id"),
        stage: adapt_rest_stage(resource),
    }
}

fn http_stage(block: &Block) -> Adapted {
    let resource = block.view();
    Adapted::Stage {
        api: target(resource, "api_id"),
        stage: adapt_http_stage(resource),
    }
}

fn method_settings(block: &Block) -> Adapted {
    let resource = block.view();
    Adapted::MethodSettings {
        api: target(resource, "rest_api_id"),
        stage_name: target(resource, "stage_name").unwrap_or_default(),
        settings: adapt_method_settings(resource),
    }
}

/// `aws_api_gateway_rest_api`: always a version 1 REST API.
pub fn adapt_rest_api(resource: BlockRef<'_>) -> Api {
    let metadata = resource.metadata();
    Api {
        name: resource.get_attribute("name").as_string_or_default("", resource),
        version: IntValue::new_default(1, &metadata),
        protocol_type: StringValue::new_default(PROTOCOL_TYPE_REST.into(), &metadata),
        stages: Vec::new(),
        metadata,
    }
}

/// `aws_apigatewayv2_api`: HTTP or WebSocket, version 2.
pub fn adapt_http_api(resource: BlockRef<'_>) -> Api {
    let metadata = resource.metadata();
    Api {
        name: resource.get_attribute("name").as_string_or_default("", resource),
        version: IntValue::new_default(2, &metadata),
        protocol_type: resource
            .get_attribute("protocol_type")
            .as_string_or_default("", resource),
        stages: Vec::new(),
        metadata,
    }
}

pub fn adapt_rest_stage(resource: BlockRef<'_>) -> Stage {
    let metadata = resource.metadata();
    Stage {
        name: resource
            .get_attribute("stage_name")
            .as_string_or_default("", resource),
        version: IntValue::new_default(1, &metadata),
        rest_method_settings: RestMethodSettings::defaults_for(&metadata),
        metadata,
    }
}

pub fn adapt_http_stage(resource: BlockRef<'_>) -> Stage {
    let metadata = resource.metadata();
    Stage {
        name: resource.get_attribute("name").as_string_or_default("", resource),
        version: IntValue::new_default(2, &metadata),
        rest_method_settings: RestMethodSettings::defaults_for(&metadata),
        metadata,
    }
}

/// `aws_api_gateway_method_settings`; caching is off unless the `settings`
/// block turns it on.
pub fn adapt_method_settings(resource: BlockRef<'_>) -> RestMethodSettings {
    let settings = resource.get_block("settings");
    RestMethodSettings {
        metadata: settings.metadata(),
        cache_enabled: settings
            .get_attribute("caching_enabled")
            .as_bool_or_default(false, settings),
        cache_data_encrypted: settings
            .get_attribute("cache_data_encrypted")
            .as_bool_or_default(false, settings),
    }
}

impl Parent for Api {
    type Child = Stage;

    fn reference(&self) -> &str {
        self.metadata.reference()
    }

    fn attach(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    fn placeholder() -> Self {
        let metadata = Metadata::unmanaged();
        Api {
            name: StringValue::new_default(String::new(), &metadata),
            version: IntValue::new_default(0, &metadata),
            protocol_type: StringValue::new_default(String::new(), &metadata),
            stages: Vec::new(),
            metadata,
        }
    }
}
