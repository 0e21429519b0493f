//! Outcome of one submission pair

use crate::features::hybrid::HybridScore;
use crate::features::structural::{Fragment, StructuralComparison};
use crate::shared::models::{StudentId, SubmissionId};
use serde::{Deserialize, Serialize};

/// Scores and fragments of one unordered submission pair
///
/// `submission1_id < submission2_id` always holds; the "left" side of every
/// fragment and coverage count is submission 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairResult {
    pub submission1_id: SubmissionId,
    pub submission2_id: SubmissionId,
    pub student1_id: StudentId,
    pub student2_id: StudentId,

    pub structural_score: f64,
    pub semantic_score: f64,
    pub hybrid_score: f64,

    pub left_covered: usize,
    pub left_total: usize,
    pub right_covered: usize,
    pub right_total: usize,

    pub longest_fragment: usize,
    pub is_flagged: bool,
    pub fragments: Vec<Fragment>,
}

/// One side of a compared pair
#[derive(Debug, Clone, Copy)]
pub(crate) struct PairSide {
    pub submission_id: SubmissionId,
    pub student_id: StudentId,
}

impl PairResult {
    /// Build a result, normalizing the side order if needed
    pub(crate) fn new(
        left: PairSide,
        right: PairSide,
        structural: StructuralComparison,
        semantic_score: f64,
        hybrid: HybridScore,
    ) -> Self {
        let result = Self {
            submission1_id: left.submission_id,
            submission2_id: right.submission_id,
            student1_id: left.student_id,
            student2_id: right.student_id,
            structural_score: structural.score,
            semantic_score,
            hybrid_score: hybrid.hybrid_score,
            left_covered: structural.covered_a,
            left_total: structural.total_a,
            right_covered: structural.covered_b,
            right_total: structural.total_b,
            longest_fragment: structural.longest_fragment,
            is_flagged: hybrid.is_flagged,
            fragments: structural.fragments,
        };
        if result.submission1_id > result.submission2_id {
            result.swapped()
        } else {
            result
        }
    }

    fn swapped(self) -> Self {
        let mut fragments: Vec<Fragment> = self.fragments.iter().map(Fragment::swapped).collect();
        fragments.sort_by_key(|f| (f.left_start, f.right_start));
        Self {
            submission1_id: self.submission2_id,
            submission2_id: self.submission1_id,
            student1_id: self.student2_id,
            student2_id: self.student1_id,
            left_covered: self.right_covered,
            left_total: self.right_total,
            right_covered: self.left_covered,
            right_total: self.left_total,
            fragments,
            ..self
        }
    }

    pub fn key(&self) -> (SubmissionId, SubmissionId) {
        (self.submission1_id, self.submission2_id)
    }

    pub fn involves_submission(&self, id: SubmissionId) -> bool {
        self.submission1_id == id || self.submission2_id == id
    }

    pub fn involves_student(&self, id: StudentId) -> bool {
        self.student1_id == id || self.student2_id == id
    }

    /// The other side of the pair as (submission, student), seen from `student`
    pub fn peer_of_student(&self, student: StudentId) -> Option<(SubmissionId, StudentId)> {
        if self.student1_id == student {
            Some((self.submission2_id, self.student2_id))
        } else if self.student2_id == student {
            Some((self.submission1_id, self.student1_id))
        } else {
            None
        }
    }

    /// Matched tokens (identical on both sides, fragments pair token for token)
    pub fn overlap(&self) -> usize {
        self.left_covered
    }

    pub fn left_coverage(&self) -> f64 {
        ratio(self.left_covered, self.left_total)
    }

    pub fn right_coverage(&self) -> f64 {
        ratio(self.right_covered, self.right_total)
    }
}

fn ratio(covered: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}
