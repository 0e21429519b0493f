//! Report aggregation and student summaries
//!
//! Runs once, after every pair worker has finished. Single-threaded.

use crate::features::report::domain::{
    AnalysisWarning, PairResult, PeerMatch, Report, RunStats, StudentSummary, SubmissionRef,
};
use crate::shared::models::{AssignmentId, StudentId};
use chrono::Utc;

/// Builds the final `Report` of a run
#[derive(Debug, Clone, Copy)]
pub struct ReportAggregator {
    assignment_id: AssignmentId,
    flag_threshold: f64,
}

impl ReportAggregator {
    pub fn new(assignment_id: AssignmentId, flag_threshold: f64) -> Self {
        Self {
            assignment_id,
            flag_threshold,
        }
    }

    /// Aggregate pair results into a report
    ///
    /// Pairs, submissions and warnings are put into their deterministic order
    /// here; the order they arrive in is irrelevant.
    pub fn aggregate(
        &self,
        mut pairs: Vec<PairResult>,
        mut submissions: Vec<SubmissionRef>,
        mut warnings: Vec<AnalysisWarning>,
        stats: RunStats,
    ) -> Report {
        pairs.sort_by_key(PairResult::key);
        submissions.sort_by_key(|s| s.submission_id);
        warnings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

        let total_comparisons = pairs.len();
        let flagged_pairs = pairs.iter().filter(|p| p.is_flagged).count();
        let (average_similarity, highest_similarity) = if pairs.is_empty() {
            (0.0, 0.0)
        } else {
            let sum: f64 = pairs.iter().map(|p| p.hybrid_score).sum();
            let max = pairs.iter().map(|p| p.hybrid_score).fold(0.0, f64::max);
            (sum / total_comparisons as f64, max)
        };

        Report {
            assignment_id: self.assignment_id,
            total_submissions: submissions.len(),
            total_comparisons,
            flagged_pairs,
            average_similarity,
            highest_similarity,
            flag_threshold: self.flag_threshold,
            pairs,
            submissions,
            warnings,
            stats,
            generated_at: Utc::now(),
        }
    }
}

/// Originality summary of one student
///
/// The best match is the highest hybrid score among pairs involving the
/// student; ties go to the peer with the lowest submission id.
pub fn summarize(report: &Report, student_id: StudentId) -> StudentSummary {
    let mut best: Option<PeerMatch> = None;
    let mut total_pairs = 0;
    let mut suspicious_pairs = 0;

    for pair in &report.pairs {
        let Some((peer_submission, peer_student)) = pair.peer_of_student(student_id) else {
            continue;
        };
        total_pairs += 1;
        if pair.is_flagged {
            suspicious_pairs += 1;
        }

        let better = match &best {
            None => true,
            Some(current) => {
                pair.hybrid_score > current.hybrid_score
                    || (pair.hybrid_score == current.hybrid_score
                        && peer_submission < current.submission_id)
            }
        };
        if better {
            best = Some(PeerMatch {
                submission_id: peer_submission,
                student_id: peer_student,
                hybrid_score: pair.hybrid_score,
            });
        }
    }

    let highest_similarity = best.map_or(0.0, |m| m.hybrid_score);
    StudentSummary {
        student_id,
        originality_score: 1.0 - highest_similarity,
        highest_similarity,
        best_match: best,
        total_pairs,
        suspicious_pairs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Language;
    use pretty_assertions::assert_eq;

    fn pair(s1: i64, s2: i64, hybrid: f64, flagged: bool) -> PairResult {
        PairResult {
            submission1_id: s1,
            submission2_id: s2,
            student1_id: s1 * 10,
            student2_id: s2 * 10,
            structural_score: hybrid,
            semantic_score: hybrid,
            hybrid_score: hybrid,
            left_covered: 0,
            left_total: 0,
            right_covered: 0,
            right_total: 0,
            longest_fragment: 0,
            is_flagged: flagged,
            fragments: Vec::new(),
        }
    }

    fn submission(id: i64) -> SubmissionRef {
        SubmissionRef {
            submission_id: id,
            student_id: id * 10,
            file_name: format!("s{}.py", id),
            language: Language::Python,
            line_count: 1,
        }
    }

    #[test]
    fn test_aggregate_counts_and_order() {
        let report = ReportAggregator::new(7, 0.5).aggregate(
            vec![pair(2, 3, 0.9, true), pair(1, 3, 0.2, false), pair(1, 2, 0.4, false)],
            vec![submission(3), submission(1), submission(2)],
            Vec::new(),
            RunStats::default(),
        );
        assert_eq!(report.total_submissions, 3);
        assert_eq!(report.total_comparisons, 3);
        assert_eq!(report.flagged_pairs, 1);
        assert!((report.average_similarity - 0.5).abs() < 1e-12);
        assert_eq!(report.highest_similarity, 0.9);
        let keys: Vec<_> = report.pairs.iter().map(PairResult::key).collect();
        assert_eq!(keys, vec![(1, 2), (1, 3), (2, 3)]);
        assert_eq!(report.pair(3, 2).map(|p| p.hybrid_score), Some(0.9));
        assert_eq!(report.flagged().count(), 1);
    }

    #[test]
    fn test_zero_comparisons_do_not_divide_by_zero() {
        let report = ReportAggregator::new(1, 0.5).aggregate(
            Vec::new(),
            vec![submission(1)],
            Vec::new(),
            RunStats::default(),
        );
        assert_eq!(report.average_similarity, 0.0);
        assert_eq!(report.highest_similarity, 0.0);
        let summary = report.summarize(10);
        assert_eq!(summary.originality_score, 1.0);
        assert_eq!(summary.best_match, None);
        assert_eq!(summary.total_pairs, 0);
    }

    #[test]
    fn test_best_match_ties_go_to_lowest_peer_id() {
        let report = ReportAggregator::new(1, 0.5).aggregate(
            vec![pair(1, 4, 0.6, true), pair(1, 3, 0.6, true), pair(1, 2, 0.1, false)],
            vec![submission(1), submission(2), submission(3), submission(4)],
            Vec::new(),
            RunStats::default(),
        );
        let summary = report.summarize(10);
        assert_eq!(summary.best_match.map(|m| m.submission_id), Some(3));
        assert_eq!(summary.total_pairs, 3);
        assert_eq!(summary.suspicious_pairs, 2);
        assert!((summary.originality_score - 0.4).abs() < 1e-12);

        let all = report.student_summaries();
        let ids: Vec<_> = all.iter().map(|s| s.student_id).collect();
        assert_eq!(ids, vec![10, 20, 30, 40]);
    }
}
