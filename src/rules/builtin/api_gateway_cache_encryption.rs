use crate::providers::aws::apigateway::PROTOCOL_TYPE_REST;
use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AWS-0002: cached method responses of REST stages must be encrypted.
///
/// Only version 1 REST stages with caching turned on are inspected.
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AWS-0002",
        provider: Provider::Aws,
        service: "api-gateway",
        short_code: "enable-cache-encryption",
        summary: "API Gateway must have cache encryption enabled",
        impact: "Data stored in the cache that is unencrypted may be vulnerable to compromise",
        resolution: "Enable cache encryption",
        explanation: "Method cache encryption ensures that any sensitive data in the cache \
                      is not vulnerable to compromise in the event of interception.",
        links: &[],
        severity: Severity::Medium,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for api in &state.aws.apigateway.apis {
        if api.metadata.is_unmanaged() || api.protocol_type.not_equal_to(PROTOCOL_TYPE_REST) {
            continue;
        }
        for stage in &api.stages {
            if stage.metadata.is_unmanaged() || stage.version.not_equal_to(1) {
                continue;
            }
            let settings = &stage.rest_method_settings;
            if settings.cache_enabled.is_false() {
                continue;
            }
            if settings.cache_data_encrypted.is_false() {
                results.add("Cache data is not encrypted.", &settings.cache_data_encrypted);
            } else {
                results.add_passed(&stage.metadata);
            }
        }
    }
    results
}
