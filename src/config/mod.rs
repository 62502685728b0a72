use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::policy::Policy;

pub const CONFIG_FILE_NAME: &str = ".iacshield.toml";

/// Top-level configuration from `.iacshield.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub scan: ScanSettings,
}

/// How the engine runs and what it reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Evaluate rules on the rayon pool.
    #[serde(default = "default_true")]
    pub parallel: bool,
    /// Keep passed results in reports.
    #[serde(default)]
    pub include_passed: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            include_passed: false,
        }
    }
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# iacshield configuration

[policy]
# Minimum severity of a failed check that fails the scan (low, medium, high, critical).
fail_on = "high"

# Rule ids or long ids whose results are reported as ignored.
# ignore_rules = ["AVD-AWS-0099", "aws-vpc-add-description-to-security-group-rule"]

# Per-rule severity overrides.
# [policy.overrides]
# "AVD-GIT-0003" = "medium"

[scan]
# Evaluate rules in parallel.
parallel = true

# Include passed checks in reports.
include_passed = false
"#
    }
}
