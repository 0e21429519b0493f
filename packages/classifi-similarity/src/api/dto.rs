//! Response DTOs

use crate::features::report::{
    to_percent, PairResult, Report, ResultDetails, StudentSummary, SubmissionRef,
};
use crate::shared::models::{AssignmentId, Language, SourceRange, StudentId, SubmissionId};
use serde::{Deserialize, Serialize};

/// Summary block of an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSummary {
    pub total_files: usize,
    pub total_pairs: usize,
    pub suspicious_pairs: usize,
    pub average_similarity: f64,
    pub max_similarity: f64,
}

/// One analyzed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub submission_id: SubmissionId,
    pub student_id: StudentId,
    pub file_name: String,
    pub language: Language,
    pub line_count: usize,
}

impl From<&SubmissionRef> for FileResponse {
    fn from(s: &SubmissionRef) -> Self {
        Self {
            submission_id: s.submission_id,
            student_id: s.student_id,
            file_name: s.file_name.clone(),
            language: s.language,
            line_count: s.line_count,
        }
    }
}

/// One compared pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairResponse {
    pub left_file: FileResponse,
    pub right_file: FileResponse,
    pub structural_score: f64,
    pub semantic_score: f64,
    pub hybrid_score: f64,

    /// Matched tokens
    pub overlap: usize,

    /// Longest fragment in tokens
    pub longest: usize,

    pub is_flagged: bool,
}

impl PairResponse {
    /// `None` when either submission is missing from the report
    pub fn from_pair(pair: &PairResult, report: &Report) -> Option<Self> {
        Some(Self {
            left_file: report.submission(pair.submission1_id)?.into(),
            right_file: report.submission(pair.submission2_id)?.into(),
            structural_score: pair.structural_score,
            semantic_score: pair.semantic_score,
            hybrid_score: pair.hybrid_score,
            overlap: pair.overlap(),
            longest: pair.longest_fragment,
            is_flagged: pair.is_flagged,
        })
    }
}

/// Response of an analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub assignment_id: AssignmentId,
    pub summary: AnalyzeSummary,
    pub files: Vec<FileResponse>,
    pub pairs: Vec<PairResponse>,
    pub warnings: Vec<String>,
}

impl From<&Report> for AnalyzeResponse {
    fn from(report: &Report) -> Self {
        Self {
            assignment_id: report.assignment_id,
            summary: AnalyzeSummary {
                total_files: report.total_submissions,
                total_pairs: report.total_comparisons,
                suspicious_pairs: report.flagged_pairs,
                average_similarity: report.average_similarity,
                max_similarity: report.highest_similarity,
            },
            files: report.submissions.iter().map(FileResponse::from).collect(),
            pairs: report
                .pairs
                .iter()
                .filter_map(|p| PairResponse::from_pair(p, report))
                .collect(),
            warnings: report.warning_messages(),
        }
    }
}

/// One fragment as a pair of editor selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentResponse {
    pub left_selection: SourceRange,
    pub right_selection: SourceRange,
    pub length: usize,
}

/// Side-by-side view of one pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDetailsResponse {
    pub pair: PairResponse,
    pub left_code: String,
    pub right_code: String,
    pub fragments: Vec<FragmentResponse>,
}

impl From<&ResultDetails> for ResultDetailsResponse {
    fn from(details: &ResultDetails) -> Self {
        let pair = &details.pair;
        Self {
            pair: PairResponse {
                left_file: (&details.left_file).into(),
                right_file: (&details.right_file).into(),
                structural_score: pair.structural_score,
                semantic_score: pair.semantic_score,
                hybrid_score: pair.hybrid_score,
                overlap: pair.overlap(),
                longest: pair.longest_fragment,
                is_flagged: pair.is_flagged,
            },
            left_code: details.left_code.clone(),
            right_code: details.right_code.clone(),
            fragments: pair
                .fragments
                .iter()
                .map(|f| FragmentResponse {
                    left_selection: f.left_range,
                    right_selection: f.right_range,
                    length: f.length,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMatchResponse {
    pub submission_id: SubmissionId,
    pub student_id: StudentId,
    pub file_name: Option<String>,

    /// Percentage, 0-100
    pub similarity: f64,
}

/// Originality of one student, scores as percentages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummaryResponse {
    pub student_id: StudentId,
    pub originality_score: f64,
    pub highest_similarity: f64,
    pub best_match: Option<BestMatchResponse>,
    pub total_pairs: usize,
    pub suspicious_pairs: usize,
}

impl StudentSummaryResponse {
    pub fn from_summary(summary: &StudentSummary, report: &Report) -> Self {
        Self {
            student_id: summary.student_id,
            originality_score: to_percent(summary.originality_score),
            highest_similarity: to_percent(summary.highest_similarity),
            best_match: summary.best_match.map(|m| BestMatchResponse {
                submission_id: m.submission_id,
                student_id: m.student_id,
                file_name: report.submission(m.submission_id).map(|s| s.file_name.clone()),
                similarity: to_percent(m.hybrid_score),
            }),
            total_pairs: summary.total_pairs,
            suspicious_pairs: summary.suspicious_pairs,
        }
    }
}
