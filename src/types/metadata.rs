use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A line range inside a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub filename: PathBuf,
    pub start_line: usize,
    pub end_line: usize,
}

impl Range {
    pub fn new(filename: impl Into<PathBuf>, start_line: usize, end_line: usize) -> Self {
        Self {
            filename: filename.into(),
            start_line,
            end_line,
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.start_line == self.end_line {
            write!(f, "{}:{}", self.filename.display(), self.start_line)
        } else {
            write!(
                f,
                "{}:{}-{}",
                self.filename.display(),
                self.start_line,
                self.end_line
            )
        }
    }
}

/// Whether a value was written in source or synthesized by an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Explicit,
    Default,
}

/// Source provenance attached to every entity and value in the state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metadata {
    range: Option<Range>,
    reference: String,
    provenance: Provenance,
    managed: bool,
}

impl Metadata {
    /// Metadata for something written explicitly in source.
    pub fn new(range: Option<Range>, reference: impl Into<String>) -> Self {
        Self {
            range,
            reference: reference.into(),
            provenance: Provenance::Explicit,
            managed: true,
        }
    }

    /// The "no source" marker, used when a default has no enclosing block.
    pub fn synthetic() -> Self {
        Self {
            range: None,
            reference: String::new(),
            provenance: Provenance::Default,
            managed: true,
        }
    }

    /// Placeholder metadata for entities that exist only to hold orphaned
    /// children. Rules skip these.
    pub fn unmanaged() -> Self {
        Self {
            range: None,
            reference: String::new(),
            provenance: Provenance::Default,
            managed: false,
        }
    }

    /// Same location, re-tagged as a synthesized default.
    pub fn as_default(&self) -> Self {
        Self {
            provenance: Provenance::Default,
            ..self.clone()
        }
    }

    pub fn range(&self) -> Option<&Range> {
        self.range.as_ref()
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    pub fn is_explicit(&self) -> bool {
        self.provenance == Provenance::Explicit
    }

    pub fn is_default(&self) -> bool {
        self.provenance == Provenance::Default
    }

    pub fn is_managed(&self) -> bool {
        self.managed
    }

    pub fn is_unmanaged(&self) -> bool {
        !self.managed
    }

    #[cfg(test)]
    pub(crate) fn test() -> Self {
        Self::new(Some(Range::new("test.tf", 123, 123)), "test")
    }
}
