use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

const MIN_RETENTION_DAYS: i64 = 365;

/// AVD-AZU-0031
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AZU-0031",
        provider: Provider::Azure,
        service: "monitor",
        short_code: "activity-log-retention-set",
        summary: "Ensure the activity retention log is set to at least a year",
        impact: "Short life activity logs can lead to missing records when investigating a breach",
        resolution: "Set a retention period that will allow for delayed investigation",
        explanation: "The average time to detect a breach is up to 210 days, to ensure that all \
                      the information required for an effective investigation is available, the \
                      retention period should allow for delayed starts to investigating.",
        links: &["https://docs.microsoft.com/en-us/azure/azure-monitor/essentials/platform-logs-overview"],
        severity: Severity::Medium,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for profile in &state.azure.monitor.log_profiles {
        if profile.metadata.is_unmanaged() {
            continue;
        }
        let retention = &profile.retention_policy;
        if retention.enabled.is_false() {
            results.add(
                "Profile does not enable the log retention policy.",
                &retention.enabled,
            );
        } else if retention.days.less_than(MIN_RETENTION_DAYS) {
            results.add(
                "Profile has a log retention policy of less than 1 year.",
                &retention.days,
            );
        } else {
            results.add_passed(&profile.metadata);
        }
    }
    results
}
