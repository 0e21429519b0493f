//! Per-student originality view

use crate::shared::models::{StudentId, SubmissionId};
use serde::{Deserialize, Serialize};

/// Best-matching peer of a student
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerMatch {
    pub submission_id: SubmissionId,
    pub student_id: StudentId,
    pub hybrid_score: f64,
}

/// Originality summary of one student, derived from a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub student_id: StudentId,

    /// `1 - highest_similarity`, or 1.0 without comparable pairs
    pub originality_score: f64,

    pub highest_similarity: f64,
    pub best_match: Option<PeerMatch>,
    pub total_pairs: usize,
    pub suspicious_pairs: usize,
}
