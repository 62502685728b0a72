use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-GCP-0063
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-GCP-0063",
        provider: Provider::Google,
        service: "gke",
        short_code: "enable-auto-repair",
        summary: "Kubernetes should have 'Automatic repair' enabled",
        impact: "Failing nodes will require manual repair.",
        resolution: "Enable automatic repair",
        explanation: "Automatic repair will monitor nodes and attempt repair when a node fails \
                      multiple subsequent health checks",
        links: &[],
        severity: Severity::Low,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for cluster in &state.google.gke.clusters {
        for pool in &cluster.node_pools {
            if pool.metadata.is_unmanaged() {
                continue;
            }
            let auto_repair = &pool.management.enable_auto_repair;
            if auto_repair.is_false() {
                results.add("Node pool does not have auto-repair enabled.", auto_repair);
            } else {
                results.add_passed(&pool.metadata);
            }
        }
    }
    results
}
