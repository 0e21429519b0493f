//! Persistence-shaped records
//!
//! Row shapes of the `similarity_reports` / `similarity_results` tables.
//! Scores are stored as `DECIMAL(5,2)` percentages in `0..=100`; writing the
//! rows is the caller's job.

use crate::features::hybrid::clamp01;
use crate::features::report::domain::{PairResult, Report};
use crate::shared::models::{AssignmentId, SubmissionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// One `similarity_results` row (without its surrogate and report ids)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResultRecord {
    pub submission1_id: SubmissionId,
    pub submission2_id: SubmissionId,
    pub structural_score: f64,
    pub semantic_score: f64,
    pub hybrid_score: f64,

    /// Fragment list as JSON
    pub matching_segments: Value,
    pub is_flagged: bool,
}

/// One `similarity_reports` row (without its surrogate id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReportRecord {
    pub assignment_id: AssignmentId,
    pub total_submissions: usize,
    pub total_comparisons: usize,
    pub flagged_pairs: usize,

    /// `None` without comparisons (nullable column)
    pub average_similarity: Option<f64>,
    pub highest_similarity: Option<f64>,
    pub generated_at: DateTime<Utc>,
}

/// Score in `[0, 1]` as a percentage rounded to 2 decimals
pub fn to_percent(score: f64) -> f64 {
    (clamp01(score) * 10_000.0).round() / 100.0
}

impl PairResult {
    pub fn to_record(&self) -> SimilarityResultRecord {
        let segments = self
            .fragments
            .iter()
            .map(|f| {
                json!({
                    "left": {
                        "startRow": f.left_range.start_row,
                        "startCol": f.left_range.start_col,
                        "endRow": f.left_range.end_row,
                        "endCol": f.left_range.end_col,
                    },
                    "right": {
                        "startRow": f.right_range.start_row,
                        "startCol": f.right_range.start_col,
                        "endRow": f.right_range.end_row,
                        "endCol": f.right_range.end_col,
                    },
                    "length": f.length,
                })
            })
            .collect();

        SimilarityResultRecord {
            submission1_id: self.submission1_id,
            submission2_id: self.submission2_id,
            structural_score: to_percent(self.structural_score),
            semantic_score: to_percent(self.semantic_score),
            hybrid_score: to_percent(self.hybrid_score),
            matching_segments: Value::Array(segments),
            is_flagged: self.is_flagged,
        }
    }
}

impl Report {
    pub fn to_record(&self) -> SimilarityReportRecord {
        let has_pairs = self.total_comparisons > 0;
        SimilarityReportRecord {
            assignment_id: self.assignment_id,
            total_submissions: self.total_submissions,
            total_comparisons: self.total_comparisons,
            flagged_pairs: self.flagged_pairs,
            average_similarity: has_pairs.then(|| to_percent(self.average_similarity)),
            highest_similarity: has_pairs.then(|| to_percent(self.highest_similarity)),
            generated_at: self.generated_at,
        }
    }

    /// Rows for every pair result, in report order
    pub fn result_records(&self) -> Vec<SimilarityResultRecord> {
        self.pairs.iter().map(PairResult::to_record).collect()
    }
}
