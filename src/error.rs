// ⚠️ Import Errors - Structural failures only
// Row-level problems never end up here: they become warnings on the parse result.

use thiserror::Error;

/// Structural failure of the catalog import pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// No header row, or a header row with nothing after it
    #[error("CSV file is empty or has no data rows.")]
    Empty,

    /// One or more of the required header names is absent
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// Input is larger than the configured upload limit
    #[error("CSV file exceeds the {} MB limit.", .limit / (1024 * 1024))]
    TooLarge { size: usize, limit: usize },

    /// Strict confirm mode: conflicting rows without a decision
    #[error("{0} conflicting book(s) require a decision.")]
    MissingDecisions(usize),
}

impl ImportError {
    /// Stable machine-readable code for API payloads
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::Empty | ImportError::MissingColumns(_) => "parse_error",
            ImportError::TooLarge { .. } => "file_too_large",
            ImportError::MissingDecisions(_) => "missing_decisions",
        }
    }
}
