//! Error types for classifi-similarity
//!
//! Per-file failures (`FileTooLarge`, `Lex`) are isolated by the orchestrator and
//! turned into report warnings. Only `InvalidConfig` and `Cancelled` prevent a
//! report from being produced.

use crate::config::ConfigError;
use crate::shared::models::SubmissionId;
use thiserror::Error;

/// Main error type for similarity engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input exceeds the configured size cap
    #[error("File too large: submission {submission_id:?} is {size} bytes (limit {limit})")]
    FileTooLarge {
        submission_id: Option<SubmissionId>,
        size: usize,
        limit: usize,
    },

    /// Malformed source that recovery could not salvage
    #[error("Lex error at {row}:{col} in submission {submission_id:?}: {message}")]
    Lex {
        submission_id: Option<SubmissionId>,
        row: u32,
        col: u32,
        message: String,
    },

    /// Run configuration rejected before any work started
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// Cooperative cancellation observed mid-run
    #[error("Analysis cancelled")]
    Cancelled,
}

impl EngineError {
    /// Attach a submission id to a per-file error raised without one
    pub fn for_submission(self, id: SubmissionId) -> Self {
        match self {
            Self::FileTooLarge { size, limit, .. } => Self::FileTooLarge {
                submission_id: Some(id),
                size,
                limit,
            },
            Self::Lex {
                row, col, message, ..
            } => Self::Lex {
                submission_id: Some(id),
                row,
                col,
                message,
            },
            other => other,
        }
    }

    /// Whether the error only affects a single file
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::FileTooLarge { .. } | Self::Lex { .. })
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
