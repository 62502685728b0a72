use crate::rules::policy::PolicyVerdict;
use crate::rules::{Finding, Severity, Status};

/// Render results as console text: failures first by severity, then by file
/// and line, followed by the verdict.
pub fn render(findings: &[Finding], verdict: &PolicyVerdict) -> String {
    let mut output = String::new();

    if findings.iter().all(|f| f.status == Status::Passed) {
        output.push_str("\n  No problems detected.\n");
    }

    let mut sorted: Vec<&Finding> = findings.iter().collect();
    sorted.sort_by(|a, b| {
        status_rank(a.status)
            .cmp(&status_rank(b.status))
            .then_with(|| b.severity().cmp(&a.severity()))
            .then_with(|| location_key(a).cmp(&location_key(b)))
    });

    if !sorted.is_empty() {
        output.push_str(&format!("\n  {} result(s):\n\n", sorted.len()));
    }

    for finding in &sorted {
        let tag = match (finding.status, finding.severity()) {
            (Status::Passed, _) => "[PASSED]  ",
            (Status::Ignored, _) => "[IGNORED] ",
            (Status::Failed, Some(Severity::Critical)) => "[CRITICAL]",
            (Status::Failed, Some(Severity::High)) => "[HIGH]    ",
            (Status::Failed, Some(Severity::Medium)) => "[MEDIUM]  ",
            (Status::Failed, Some(Severity::Low) | None) => "[LOW]     ",
        };
        let long_id = finding.rule.as_ref().map_or("", |r| r.long_id.as_str());

        output.push_str(&format!("  {} {} ({})\n", tag, finding.rule_id(), long_id));
        if !finding.message.is_empty() {
            output.push_str(&format!("           {}\n", finding.message));
        }
        output.push_str(&format!("           at {}\n\n", location(finding)));
    }

    let status = if verdict.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "\n  Result: {} ({} failed, {} passed, {} ignored; threshold: {}, highest: {})\n\n",
        status,
        verdict.failed,
        verdict.passed,
        verdict.ignored,
        verdict.fail_threshold,
        verdict
            .highest_severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".into()),
    ));

    output
}

fn status_rank(status: Status) -> u8 {
    match status {
        Status::Failed => 0,
        Status::Ignored => 1,
        Status::Passed => 2,
    }
}

fn location_key(finding: &Finding) -> (String, usize) {
    match finding.metadata.range() {
        Some(range) => (range.filename.display().to_string(), range.start_line),
        None => (String::new(), 0),
    }
}

fn location(finding: &Finding) -> String {
    match finding.metadata.range() {
        Some(range) => format!("{} ({})", range, finding.metadata.reference()),
        None if !finding.metadata.reference().is_empty() => finding.metadata.reference().to_string(),
        None => "-".into(),
    }
}
