//! Domain assertions

use classifi_similarity::{Fragment, PairResult, Report, StructuralComparison};

/// Assert the report invariants that hold for every run
pub fn assert_report_consistent(report: &Report) {
    let keys: Vec<_> = report.pairs.iter().map(PairResult::key).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(keys, sorted, "pairs must be unique and ordered by submission ids");

    for pair in &report.pairs {
        assert!(pair.submission1_id < pair.submission2_id);
        assert_ne!(pair.student1_id, pair.student2_id, "same-student pair {:?}", pair.key());
        for score in [pair.structural_score, pair.semantic_score, pair.hybrid_score] {
            assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
        }
        assert_eq!(pair.is_flagged, pair.hybrid_score >= report.flag_threshold);
    }

    assert_eq!(report.total_comparisons, report.pairs.len());
    assert_eq!(report.flagged_pairs, report.flagged().count());
}

/// Assert fragments never overlap on either side
pub fn assert_fragments_disjoint(fragments: &[Fragment]) {
    for (i, a) in fragments.iter().enumerate() {
        for b in &fragments[i + 1..] {
            assert!(
                a.left_tokens().end <= b.left_tokens().start
                    || b.left_tokens().end <= a.left_tokens().start,
                "left overlap: {:?} / {:?}",
                a,
                b
            );
            assert!(
                !a.right_range.overlaps(&b.right_range),
                "right overlap: {:?} / {:?}",
                a,
                b
            );
        }
    }
}

/// Fragment set of `ba` seen from the other side, ordered like `ab`
pub fn swapped_fragments(ba: &StructuralComparison) -> Vec<Fragment> {
    let mut swapped: Vec<Fragment> = ba.fragments.iter().map(Fragment::swapped).collect();
    swapped.sort_by_key(|f| (f.left_start, f.right_start));
    swapped
}
