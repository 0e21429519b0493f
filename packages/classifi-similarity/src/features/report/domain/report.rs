//! Aggregate of one analysis run

use super::{AnalysisWarning, PairResult, StudentSummary};
use crate::shared::models::{AssignmentId, Language, SourceFile, StudentId, SubmissionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Submission metadata kept on the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRef {
    pub submission_id: SubmissionId,
    pub student_id: StudentId,
    pub file_name: String,
    pub language: Language,
    pub line_count: usize,
}

impl From<&SourceFile> for SubmissionRef {
    fn from(file: &SourceFile) -> Self {
        Self {
            submission_id: file.submission_id,
            student_id: file.student_id,
            file_name: file.file_name.clone(),
            language: file.language,
            line_count: file.line_count(),
        }
    }
}

/// Counters of one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub files_tokenized: usize,
    pub files_skipped: usize,
    pub pairs_compared: usize,
    pub pairs_skipped: usize,
    pub elapsed_ms: u64,
}

/// Read-only result of one analysis run over one assignment
///
/// `pairs` are sorted by `(submission1_id, submission2_id)`, `submissions` by
/// id. A new run produces a new report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub assignment_id: AssignmentId,
    pub total_submissions: usize,
    pub total_comparisons: usize,
    pub flagged_pairs: usize,

    /// Mean hybrid score, 0.0 without comparisons
    pub average_similarity: f64,

    /// Max hybrid score, 0.0 without comparisons
    pub highest_similarity: f64,

    pub flag_threshold: f64,
    pub pairs: Vec<PairResult>,
    pub submissions: Vec<SubmissionRef>,
    pub warnings: Vec<AnalysisWarning>,
    pub stats: RunStats,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    /// Flagged pairs in report order
    pub fn flagged(&self) -> impl Iterator<Item = &PairResult> + '_ {
        self.pairs.iter().filter(|p| p.is_flagged)
    }

    /// Result for a pair, in either argument order
    pub fn pair(&self, a: SubmissionId, b: SubmissionId) -> Option<&PairResult> {
        let key = (a.min(b), a.max(b));
        self.pairs
            .binary_search_by_key(&key, PairResult::key)
            .ok()
            .and_then(|i| self.pairs.get(i))
    }

    pub fn submission(&self, id: SubmissionId) -> Option<&SubmissionRef> {
        self.submissions.iter().find(|s| s.submission_id == id)
    }

    /// Submission ids grouped by owning student
    pub fn submissions_by_student(&self) -> BTreeMap<StudentId, Vec<SubmissionId>> {
        let mut grouped: BTreeMap<StudentId, Vec<SubmissionId>> = BTreeMap::new();
        for s in &self.submissions {
            grouped.entry(s.student_id).or_default().push(s.submission_id);
        }
        grouped
    }

    /// Students appearing in the run, ascending
    pub fn student_ids(&self) -> Vec<StudentId> {
        self.submissions
            .iter()
            .map(|s| s.student_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Summary for one student
    pub fn summarize(&self, student_id: StudentId) -> StudentSummary {
        crate::features::report::application::summarize(self, student_id)
    }

    /// Summaries of every student, ascending by student id
    pub fn student_summaries(&self) -> Vec<StudentSummary> {
        self.student_ids()
            .into_iter()
            .map(|id| self.summarize(id))
            .collect()
    }

    /// Human-readable warning strings
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}
