use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-AWS-0074: broker logs must go somewhere.
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-AWS-0074",
        provider: Provider::Aws,
        service: "msk",
        short_code: "enable-logging",
        summary: "Ensure MSK Cluster logging is enabled",
        impact: "Without logging it is difficult to trace issues",
        resolution: "Enable logging",
        explanation: "Managed streaming for Kafka can log to Cloud Watch, Kinesis Firehose \
                      and S3, at least one of these locations should be logged to.",
        links: &["https://docs.aws.amazon.com/msk/latest/developerguide/msk-logging.html"],
        severity: Severity::Medium,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for cluster in &state.aws.msk.clusters {
        if cluster.metadata.is_unmanaged() {
            continue;
        }
        let broker = &cluster.logging.broker;
        if broker.any_enabled() {
            results.add_passed(&cluster.metadata);
        } else {
            results.add_at("Cluster does not ship logs to any service.", &broker.metadata);
        }
    }
    results
}
