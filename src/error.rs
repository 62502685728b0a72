use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShieldError>;

/// Failures that stop a scan. Adaptation and rule evaluation never fail;
/// everything here comes from input loading, configuration or setup.
#[derive(Error, Debug)]
pub enum ShieldError {
    /// A graph file that is not valid JSON or not a block graph.
    #[error("{file}:{line}:{column}: invalid configuration graph: {message}")]
    Parse {
        file: String,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("No configuration modules found at: {0}")]
    NoModules(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Two checks share an id or a long id.
    #[error("Rule registered twice: {0}")]
    DuplicateRule(String),

    #[error("Cannot write report: {0}")]
    Output(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid .iacshield.toml: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ShieldError {
    /// Process exit code; 0 and 1 are reserved for pass and fail verdicts.
    pub fn exit_code(&self) -> i32 {
        2
    }

    /// Whether the error comes from the scanned input rather than from
    /// the tool's own configuration or environment.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::NoModules(_))
    }
}
