//! Non-fatal problems recorded during a run

use crate::errors::EngineError;
use crate::shared::models::SubmissionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a recorded warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    FileTooLarge,
    LexError,
    DuplicateSubmission,
    TemplateUnusable,
}

impl WarningKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileTooLarge => "file_too_large",
            Self::LexError => "lex_error",
            Self::DuplicateSubmission => "duplicate_submission",
            Self::TemplateUnusable => "template_unusable",
        }
    }
}

/// A per-file (or template) problem that did not stop the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisWarning {
    /// `None` for template warnings
    pub submission_id: Option<SubmissionId>,
    pub kind: WarningKind,
    pub message: String,

    /// Pairs not compared because of this problem
    pub pairs_skipped: usize,
}

impl AnalysisWarning {
    /// Warning for a file that could not be tokenized
    ///
    /// Returns `None` for errors that are not per-file.
    pub fn for_file_error(
        submission_id: SubmissionId,
        file_name: &str,
        error: &EngineError,
        pairs_skipped: usize,
    ) -> Option<Self> {
        let (kind, detail) = match error {
            EngineError::FileTooLarge { size, limit, .. } => (
                WarningKind::FileTooLarge,
                format!("{} bytes exceeds the {} byte limit", size, limit),
            ),
            EngineError::Lex {
                row, col, message, ..
            } => (
                WarningKind::LexError,
                format!("no usable tokens ({} at {}:{})", message, row, col),
            ),
            EngineError::InvalidConfig(_) | EngineError::Cancelled => return None,
        };
        Some(Self {
            submission_id: Some(submission_id),
            kind,
            message: format!(
                "{} (submission {}) could not be analyzed: {}; {} pair(s) skipped",
                file_name, submission_id, detail, pairs_skipped
            ),
            pairs_skipped,
        })
    }

    /// Warning for a repeated submission id in the input
    pub fn duplicate(submission_id: SubmissionId, file_name: &str) -> Self {
        Self {
            submission_id: Some(submission_id),
            kind: WarningKind::DuplicateSubmission,
            message: format!(
                "{} (submission {}) appears more than once; only the first copy is analyzed",
                file_name, submission_id
            ),
            pairs_skipped: 0,
        }
    }

    /// Warning for template code that could not be tokenized
    pub fn template_unusable(error: &EngineError) -> Self {
        Self {
            submission_id: None,
            kind: WarningKind::TemplateUnusable,
            message: format!("template code ignored: {}", error),
            pairs_skipped: 0,
        }
    }

    /// Deterministic ordering key
    pub(crate) fn sort_key(&self) -> (Option<SubmissionId>, WarningKind) {
        (self.submission_id, self.kind)
    }
}

impl fmt::Display for AnalysisWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
