use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-GCP-0058
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-GCP-0058",
        provider: Provider::Google,
        service: "gke",
        short_code: "enable-auto-upgrade",
        summary: "Kubernetes should have 'Automatic upgrade' enabled",
        impact: "Nodes will need the cluster master version manually updating",
        resolution: "Enable automatic upgrades",
        explanation: "Automatic updates keep nodes updated with the latest cluster master \
                      version.",
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
            let auto_upgrade = &pool.management.enable_auto_upgrade;
            if auto_upgrade.is_false() {
                results.add("Node pool does not have auto-upgrade enabled.", auto_upgrade);
            } else {
                results.add_passed(&pool.metadata);
            }
        }
    }
    results
}
