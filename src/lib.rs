//! iacshield: static security scanner for infrastructure-as-code.
//!
//! Reads a pre-resolved configuration graph, adapts its blocks into typed
//! cloud state, runs the built-in rule catalog against it and reports the
//! results as console text, JSON or SARIF.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use iacshield::{scan, ScanOptions};
//!
//! let options = ScanOptions::default();
//! let report = scan(Path::new("./graph.json"), &options).unwrap();
//! println!("Pass: {}, Failed: {}", report.verdict.pass, report.verdict.failed);
//! ```

pub mod adapters;
pub mod block;
pub mod cidr;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod providers;
pub mod rules;
pub mod types;

use std::path::{Path, PathBuf};

use block::Module;
use config::{Config, CONFIG_FILE_NAME};
use error::{Result, ShieldError};
use output::OutputFormat;
use rules::policy::PolicyVerdict;
use rules::{Finding, RuleEngine};

/// Options for a scan invocation.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Path to config file (defaults to `.iacshield.toml` next to the target).
    pub config_path: Option<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// CLI override for fail_on threshold.
    pub fail_on_override: Option<rules::Severity>,
    /// CLI override for reporting passed checks.
    pub include_passed: Option<bool>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            format: OutputFormat::Console,
            fail_on_override: None,
            include_passed: None,
        }
    }
}

/// Complete scan report.
#[derive(Debug)]
pub struct ScanReport {
    pub target_name: String,
    /// Every result after the policy is applied, in rule registration order.
    pub findings: Vec<Finding>,
    pub verdict: PolicyVerdict,
    pub include_passed: bool,
}

/// Run a complete scan: load config and graph, adapt, evaluate, apply policy.
pub fn scan(path: &Path, options: &ScanOptions) -> Result<ScanReport> {
    let config_path = match &options.config_path {
        Some(explicit) if !explicit.exists() => {
            return Err(ShieldError::Config(format!(
                "config file not found: {}",
                explicit.display()
            )));
        }
        Some(explicit) => explicit.clone(),
        None => default_config_path(path),
    };
    let mut config = Config::load(&config_path)?;

    if let Some(fail_on) = options.fail_on_override {
        config.policy.fail_on = fail_on;
    }
    if let Some(include_passed) = options.include_passed {
        config.scan.include_passed = include_passed;
    }

    let modules = parser::load(path)?;
    let target_name = path
        .file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".into());

    let (findings, verdict) = scan_modules(&modules, &config)?;

    Ok(ScanReport {
        target_name,
        findings,
        verdict,
        include_passed: config.scan.include_passed,
    })
}

/// Adapt already-loaded modules and evaluate the catalog under `config`.
pub fn scan_modules(modules: &[Module], config: &Config) -> Result<(Vec<Finding>, PolicyVerdict)> {
    let state = adapters::adapt(modules);
    for (provider, services) in state.entity_counts() {
        for (service, count) in services.into_iter().filter(|(_, n)| *n > 0) {
            tracing::info!(%provider, service, count, "adapted entities");
        }
    }

    let engine = RuleEngine::new()?.parallel(config.scan.parallel);
    let raw = engine.run(&state);
    tracing::debug!(results = raw.len(), rules = engine.registry().len(), "evaluation finished");

    let findings = config.policy.apply(&raw);
    let verdict = config.policy.evaluate(&findings);
    Ok((findings, verdict))
}

/// Render a scan report in the specified format.
pub fn render_report(report: &ScanReport, format: OutputFormat) -> Result<String> {
    output::render(
        &report.findings,
        &report.verdict,
        format,
        &report.target_name,
        report.include_passed,
    )
}

fn default_config_path(target: &Path) -> PathBuf {
    let dir = if target.is_file() {
        target.parent().unwrap_or_else(|| Path::new("."))
    } else {
        target
    };
    dir.join(CONFIG_FILE_NAME)
}
