use crate::providers::{Provider, State};
use crate::rules::{Check, Results, Rule, Severity};

/// AVD-GIT-0003
pub(super) const CHECK: Check = Check {
    rule: Rule {
        id: "AVD-GIT-0003",
        provider: Provider::GitHub,
        service: "repositories",
        short_code: "enable-vulnerability-alerts",
        summary: "GitHub repository has vulnerability alerts disabled.",
        impact: "Known vulnerabilities may go unnoticed",
        resolution: "Enable vulnerability alerts",
        explanation: "GitHub repository should have vulnerability alerts enabled so that \
                      vulnerable dependencies are flagged.",
        links: &["https://docs.github.com/en/code-security/supply-chain-security/managing-vulnerabilities-in-your-projects-dependencies/about-alerts-for-vulnerable-dependencies"],
        severity: Severity::High,
    },
    evaluate,
};

fn evaluate(state: &State) -> Results {
    let mut results = Results::new();
    for repo in &state.github.repositories {
        if repo.metadata.is_unmanaged() {
            continue;
        }
        if repo.vulnerability_alerts.is_false() {
            results.add(
                "Repository does not have vulnerability alerts enabled.",
                &repo.vulnerability_alerts,
            );
        } else {
            results.add_passed(&repo.metadata);
        }
    }
    results
}
