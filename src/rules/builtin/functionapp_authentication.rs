use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AZU-0003
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AZU-0003",
        provider: Provider::Azure,
        service: "functionapp",
        short_code: "authentication-enabled",
        summary: "Function App authentication is activated",
        impact: "Anonymous HTTP requests will be accepted",
        resolution: "Enable authentication to prevent anonymous request being accepted",
        explanation: "Enabling authentication ensures that all communications in the \
                      application are authenticated. The auth_settings block needs to be filled \
                      out with the appropriate auth backend settings.",
        links: &[],
        severity: Severity::Low,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for app in &state.azure.appservice.function_apps {
        if app.metadata.is_unmanaged() {
            continue;
        }
        let enabled = &app.authentication.enabled;
        if enabled.is_false() {
            results.add("Function app does not have authentication enabled.", enabled);
        } else {
            results.add_passed(&app.metadata);
        }
    }
    results
}
