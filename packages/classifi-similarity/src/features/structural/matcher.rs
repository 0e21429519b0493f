//! Winnowing-based structural matcher
//!
//! # Algorithm
//!
//! 1. Hash every token (kind + text) in the structural hash space
//! 2. Roll the token hashes into k-gram hashes and winnow them
//! 3. For each left fingerprint, look up right k-grams with the same hash
//! 4. Verify the k-gram token by token (hash hits are only hints)
//! 5. Extend the verified seed maximally left and right, once per maximal
//!    match (later seeds on the same diagonal inside it are skipped)
//! 6. Drop candidates shorter than `min_fragment_length`
//! 7. Accept longest first, keeping only the parts not yet covered on
//!    either side, so fragments never overlap within one file
//!
//! Since `min_fragment_length >= k + w - 1`, every maximal match that is long
//! enough is seeded from both directions. The accepted set therefore depends
//! only on the two token streams, not on which side is "left".
//!
//! # Complexity
//!
//! - Fingerprinting: O(n · w)
//! - Matching: O(s + Σm) where s is seed pairs and m each maximal match length
//!
//! Identical streams short-circuit to a single fragment covering both, so
//! files shorter than `min_fragment_length` still compare as identical.

use super::fragment::Fragment;
use crate::config::RunConfig;
use crate::errors::{EngineError, Result};
use crate::features::fingerprint::{
    kgram_hashes, symbol_hash, winnow, Fingerprint, FingerprintIndex, STRUCTURAL_SEED,
};
use crate::features::tokenization::{Token, TokenStream};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tokio_util::sync::CancellationToken;

/// Winnowed structural fingerprints of one token stream
#[derive(Debug, Clone, Default)]
pub struct StreamFingerprints {
    fingerprints: Vec<Fingerprint>,
    index: FingerprintIndex,
}

impl StreamFingerprints {
    pub fn fingerprints(&self) -> &[Fingerprint] {
        &self.fingerprints
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }
}

/// Result of comparing two token streams structurally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuralComparison {
    pub coverage_a: f64,
    pub coverage_b: f64,

    /// Distinct tokens of each side inside some fragment
    pub covered_a: usize,
    pub covered_b: usize,

    pub total_a: usize,
    pub total_b: usize,

    /// Length (tokens) of the longest fragment, 0 without fragments
    pub longest_fragment: usize,

    /// Sorted by (left_start, right_start)
    pub fragments: Vec<Fragment>,

    /// Mean of the two coverage ratios
    pub score: f64,
}

impl StructuralComparison {
    fn empty(total_a: usize, total_b: usize) -> Self {
        Self {
            coverage_a: 0.0,
            coverage_b: 0.0,
            covered_a: 0,
            covered_b: 0,
            total_a,
            total_b,
            longest_fragment: 0,
            fragments: Vec::new(),
            score: 0.0,
        }
    }
}

/// Verified, maximally extended match between the two streams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    left_start: usize,
    right_start: usize,
    length: usize,
}

/// Structural matcher configured for one run
#[derive(Debug, Clone, Copy)]
pub struct StructuralMatcher {
    k_gram_size: usize,
    winnow_window_size: usize,
    min_fragment_length: usize,
}

impl Default for StructuralMatcher {
    fn default() -> Self {
        Self::new(&RunConfig::default())
    }
}

impl StructuralMatcher {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            k_gram_size: config.k_gram_size.max(1),
            winnow_window_size: config.winnow_window_size.max(1),
            min_fragment_length: config.min_fragment_length.max(1),
        }
    }

    pub fn min_fragment_length(&self) -> usize {
        self.min_fragment_length
    }

    /// Winnowed fingerprints of a stream, computed once per file
    pub fn fingerprint(&self, stream: &TokenStream) -> StreamFingerprints {
        let symbols: Vec<u64> = stream
            .iter()
            .map(|token| symbol_hash(STRUCTURAL_SEED, &[token.kind.as_str(), token.text.as_str()]))
            .collect();
        let fingerprints = winnow(
            &kgram_hashes(&symbols, self.k_gram_size),
            self.winnow_window_size,
        );
        let index = FingerprintIndex::new(&fingerprints);
        StreamFingerprints {
            fingerprints,
            index,
        }
    }

    /// Compare two streams, fingerprinting both
    pub fn compare_streams(&self, left: &TokenStream, right: &TokenStream) -> StructuralComparison {
        let left_fp = self.fingerprint(left);
        let right_fp = self.fingerprint(right);
        self.compare(left, &left_fp, right, &right_fp)
    }

    /// Compare two streams using precomputed fingerprints
    pub fn compare(
        &self,
        left: &TokenStream,
        left_fp: &StreamFingerprints,
        right: &TokenStream,
        right_fp: &StreamFingerprints,
    ) -> StructuralComparison {
        let never = || false;
        self.compare_until(left, left_fp, right, right_fp, &never)
            .unwrap_or_else(|| StructuralComparison::empty(left.len(), right.len()))
    }

    /// Like [`compare`](Self::compare), polling `cancel` while matching
    ///
    /// Returns `EngineError::Cancelled` once the token fires.
    pub fn compare_cancellable(
        &self,
        left: &TokenStream,
        left_fp: &StreamFingerprints,
        right: &TokenStream,
        right_fp: &StreamFingerprints,
        cancel: &CancellationToken,
    ) -> Result<StructuralComparison> {
        let cancelled = || cancel.is_cancelled();
        self.compare_until(left, left_fp, right, right_fp, &cancelled)
            .ok_or(EngineError::Cancelled)
    }

    /// `None` once `cancelled` reports true
    fn compare_until(
        &self,
        left: &TokenStream,
        left_fp: &StreamFingerprints,
        right: &TokenStream,
        right_fp: &StreamFingerprints,
        cancelled: &dyn Fn() -> bool,
    ) -> Option<StructuralComparison> {
        let (l, r) = (left.tokens(), right.tokens());
        if l.is_empty() || r.is_empty() {
            return Some(StructuralComparison::empty(l.len(), r.len()));
        }

        let accepted = if runs_equal(l, r) {
            // Identical streams: one fragment, whatever the length
            vec![Candidate {
                left_start: 0,
                right_start: 0,
                length: l.len(),
            }]
        } else {
            let candidates = self.candidates(l, left_fp, r, right_fp, cancelled)?;
            self.select(candidates, l.len(), r.len(), cancelled)?
        };

        let mut covered_left = vec![false; l.len()];
        let mut covered_right = vec![false; r.len()];
        for c in &accepted {
            covered_left[c.left_start..c.left_start + c.length].fill(true);
            covered_right[c.right_start..c.right_start + c.length].fill(true);
        }

        let fragments: Vec<Fragment> = accepted
            .iter()
            .filter_map(|c| {
                Some(Fragment {
                    left_range: left.range_of(c.left_start, c.length)?,
                    right_range: right.range_of(c.right_start, c.length)?,
                    length: c.length,
                    left_start: c.left_start,
                    right_start: c.right_start,
                })
            })
            .collect();

        let covered_a = covered_left.iter().filter(|&&c| c).count();
        let covered_b = covered_right.iter().filter(|&&c| c).count();
        let coverage_a = covered_a as f64 / l.len() as f64;
        let coverage_b = covered_b as f64 / r.len() as f64;

        Some(StructuralComparison {
            coverage_a,
            coverage_b,
            covered_a,
            covered_b,
            total_a: l.len(),
            total_b: r.len(),
            longest_fragment: fragments.iter().map(|f| f.length).max().unwrap_or(0),
            fragments,
            score: (coverage_a + coverage_b) / 2.0,
        })
    }

    /// Maximal verified matches of at least `min_fragment_length` tokens
    ///
    /// Each maximal match is extended once: seeds falling inside an extent
    /// already recorded on their diagonal are skipped.
    fn candidates(
        &self,
        left: &[Token],
        left_fp: &StreamFingerprints,
        right: &[Token],
        right_fp: &StreamFingerprints,
        cancelled: &dyn Fn() -> bool,
    ) -> Option<Vec<Candidate>> {
        let k = self.k_gram_size;
        let mut extents = DiagonalExtents::default();
        let mut found = Vec::new();

        for fp in &left_fp.fingerprints {
            if cancelled() {
                return None;
            }
            let l_pos = fp.position;
            for &r_pos in right_fp.index.positions(fp.hash) {
                if extents.covers(l_pos, r_pos) {
                    continue;
                }
                let (Some(l_gram), Some(r_gram)) =
                    (left.get(l_pos..l_pos + k), right.get(r_pos..r_pos + k))
                else {
                    continue;
                };
                if !runs_equal(l_gram, r_gram) {
                    // hash collision
                    continue;
                }

                let (mut l_start, mut r_start) = (l_pos, r_pos);
                while l_start > 0 && r_start > 0 && left[l_start - 1].same_lexeme(&right[r_start - 1]) {
                    l_start -= 1;
                    r_start -= 1;
                }
                let mut length = l_pos + k - l_start;
                while l_start + length < left.len()
                    && r_start + length < right.len()
                    && left[l_start + length].same_lexeme(&right[r_start + length])
                {
                    length += 1;
                }

                extents.record(l_start, r_start, length);
                if length >= self.min_fragment_length {
                    found.push(Candidate {
                        left_start: l_start,
                        right_start: r_start,
                        length,
                    });
                }
            }
        }

        Some(found)
    }

    /// Greedy longest-first acceptance of the uncovered parts of each candidate
    fn select(
        &self,
        mut candidates: Vec<Candidate>,
        left_len: usize,
        right_len: usize,
        cancelled: &dyn Fn() -> bool,
    ) -> Option<Vec<Candidate>> {
        candidates.sort_by(candidate_order);
        let mut covered_left = vec![false; left_len];
        let mut covered_right = vec![false; right_len];

        let mut accepted = Vec::new();
        for c in candidates {
            if cancelled() {
                return None;
            }
            let mut run_start: Option<usize> = None;
            for offset in 0..=c.length {
                let free = offset < c.length
                    && !covered_left[c.left_start + offset]
                    && !covered_right[c.right_start + offset];
                match (free, run_start) {
                    (true, None) => run_start = Some(offset),
                    (false, Some(start)) => {
                        if offset - start >= self.min_fragment_length {
                            let run = Candidate {
                                left_start: c.left_start + start,
                                right_start: c.right_start + start,
                                length: offset - start,
                            };
                            covered_left[run.left_start..run.left_start + run.length].fill(true);
                            covered_right[run.right_start..run.right_start + run.length].fill(true);
                            accepted.push(run);
                        }
                        run_start = None;
                    }
                    _ => {}
                }
            }
        }

        accepted.sort_by_key(|c| (c.left_start, c.right_start));
        Some(accepted)
    }
}

/// Left-side extent of the latest maximal match on each diagonal
///
/// Fingerprints are visited in ascending left position, so on any diagonal
/// only the most recent match can contain a later seed.
#[derive(Debug, Default)]
struct DiagonalExtents {
    latest: FxHashMap<isize, (usize, usize)>,
}

impl DiagonalExtents {
    fn diagonal(l_pos: usize, r_pos: usize) -> isize {
        l_pos as isize - r_pos as isize
    }

    fn covers(&self, l_pos: usize, r_pos: usize) -> bool {
        self.latest
            .get(&Self::diagonal(l_pos, r_pos))
            .is_some_and(|&(start, end)| start <= l_pos && l_pos < end)
    }

    fn record(&mut self, l_start: usize, r_start: usize, length: usize) {
        self.latest
            .insert(Self::diagonal(l_start, r_start), (l_start, l_start + length));
    }
}

/// Longest first; ties broken by side-independent keys before `left_start`
fn candidate_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.length
        .cmp(&a.length)
        .then_with(|| (a.left_start + a.right_start).cmp(&(b.left_start + b.right_start)))
        .then_with(|| a.left_start.min(a.right_start).cmp(&b.left_start.min(b.right_start)))
        .then_with(|| a.left_start.cmp(&b.left_start))
}

fn runs_equal(a: &[Token], b: &[Token]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_lexeme(y))
}

/// Compare two streams with the default configuration
pub fn compare_structure(left: &TokenStream, right: &TokenStream) -> StructuralComparison {
    StructuralMatcher::default().compare_streams(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tokenization::tokenize;
    use crate::shared::models::Language;

    const MEAN: &str = "def mean(values):\n    total = 0\n    for v in values:\n        total += v\n    return total / len(values)\n";

    fn py(source: &str) -> TokenStream {
        tokenize(source, Language::Python, None).unwrap()
    }

    #[test]
    fn test_identical_streams_single_full_fragment() {
        let a = py(MEAN);
        let cmp = compare_structure(&a, &a.clone());
        assert_eq!(cmp.score, 1.0);
        assert_eq!(cmp.coverage_a, 1.0);
        assert_eq!(cmp.coverage_b, 1.0);
        assert_eq!(cmp.fragments.len(), 1);
        assert_eq!(cmp.fragments[0].length, a.len());
        assert_eq!(cmp.longest_fragment, a.len());
        assert_eq!(Some(cmp.fragments[0].left_range), a.range_of(0, a.len()));
    }

    #[test]
    fn test_empty_stream_scores_zero() {
        let empty = TokenStream::new(Language::Python, Vec::new());
        let cmp = compare_structure(&empty, &py(MEAN));
        assert_eq!(cmp.score, 0.0);
        assert_eq!(cmp.coverage_a, 0.0);
        assert!(cmp.fragments.is_empty());
        assert_eq!(cmp.total_a, 0);
        assert_eq!(cmp.total_b, 24);
    }

    #[test]
    fn test_short_shared_run_is_noise() {
        let a = py("result = alpha + beta\nprint(result)\n");
        let b = py("value = alpha + beta\nshow(value)\n");
        let cmp = compare_structure(&a, &b);
        assert!(cmp.fragments.is_empty());
        assert_eq!(cmp.score, 0.0);
    }

    #[test]
    fn test_symmetric_fragment_sets() {
        let a = py(&format!("{}\ndef noop():\n    pass\n", MEAN));
        let b = py(&format!("import os\nprint(os.getcwd())\n{}", MEAN));
        let ab = compare_structure(&a, &b);
        let ba = compare_structure(&b, &a);

        let mut swapped: Vec<Fragment> = ba.fragments.iter().map(Fragment::swapped).collect();
        swapped.sort_by_key(|f| (f.left_start, f.right_start));
        assert_eq!(ab.fragments, swapped);
        assert_eq!(ab.score, ba.score);
        assert_eq!(ab.coverage_a, ba.coverage_b);
        assert!(!ab.fragments.is_empty());
    }

    #[test]
    fn test_fragments_do_not_overlap_within_a_file() {
        let a = py(MEAN);
        let b = py(&format!("{}{}", MEAN, MEAN));
        let cmp = compare_structure(&a, &b);
        assert_eq!(cmp.fragments.len(), 1);
        assert_eq!(cmp.coverage_a, 1.0);
        assert_eq!(cmp.coverage_b, 0.5);
        assert_eq!(cmp.score, 0.75);
        assert_eq!(cmp.fragments[0].right_start, 0);
    }

    #[test]
    fn test_appending_unrelated_code_does_not_raise_score() {
        let a = py(MEAN);
        let before = compare_structure(&a, &py(MEAN));
        let after = compare_structure(
            &a,
            &py(&format!("{}print('unrelated output here')\nflag = not flag\n", MEAN)),
        );
        assert_eq!(after.coverage_a, before.coverage_a);
        assert!(after.score <= before.score);
    }

    #[test]
    fn test_identical_short_streams_single_fragment() {
        // between k and min_fragment_length tokens, and below k
        for source in ["total = price * qty", "total = price * qty + tax", "x = 1"] {
            let a = py(source);
            let cmp = compare_structure(&a, &a.clone());
            assert_eq!(cmp.score, 1.0, "{}", source);
            assert_eq!(cmp.fragments.len(), 1);
            assert_eq!(cmp.fragments[0].length, a.len());
        }
    }

    #[test]
    fn test_repetitive_streams_extend_each_run_once() {
        let left = py(&"a = 1\n".repeat(1000));
        let right = py(&format!("{}b = 2\n", "a = 1\n".repeat(999)));
        let matcher = StructuralMatcher::default();
        let (left_fp, right_fp) = (matcher.fingerprint(&left), matcher.fingerprint(&right));

        let never = || false;
        let candidates = matcher
            .candidates(left.tokens(), &left_fp, right.tokens(), &right_fp, &never)
            .unwrap();
        // one maximal match per diagonal shifted by whole statements
        let mut diagonals: Vec<isize> = candidates
            .iter()
            .map(|c| DiagonalExtents::diagonal(c.left_start, c.right_start))
            .collect();
        diagonals.sort_unstable();
        let before = diagonals.len();
        diagonals.dedup();
        assert_eq!(diagonals.len(), before);

        let started = std::time::Instant::now();
        let cmp = matcher.compare(&left, &left_fp, &right, &right_fp);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        assert_eq!(cmp.fragments.len(), 1);
        assert_eq!(cmp.covered_b, right.len() - 3);
    }

    #[test]
    fn test_cancelled_comparison_stops() {
        let a = py(MEAN);
        let b = py(&format!("{}{}", MEAN, MEAN));
        let matcher = StructuralMatcher::default();
        let token = CancellationToken::new();
        let live = matcher.compare_cancellable(
            &a,
            &matcher.fingerprint(&a),
            &b,
            &matcher.fingerprint(&b),
            &token,
        );
        assert_eq!(live.unwrap(), matcher.compare_streams(&a, &b));

        token.cancel();
        let cancelled = matcher.compare_cancellable(
            &a,
            &matcher.fingerprint(&a),
            &b,
            &matcher.fingerprint(&b),
            &token,
        );
        assert!(matches!(cancelled, Err(EngineError::Cancelled)));
    }

    #[test]
    fn test_rename_breaks_exact_runs() {
        let renamed = MEAN.replace("total", "acc");
        let cmp = compare_structure(&py(MEAN), &py(&renamed));
        assert!(cmp.score < 1.0);
    }
}
