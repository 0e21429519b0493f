//! Canonical k-gram overlap scoring

use super::canonicalizer::canonicalize;
use crate::config::RunConfig;
use crate::features::fingerprint::{kgram_hashes, symbol_hash, winnow, SEMANTIC_SEED};
use crate::features::tokenization::TokenStream;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Canonical stream and winnowed semantic fingerprints of one file
#[derive(Debug, Clone, Default)]
pub struct SemanticProfile {
    canonical: Vec<String>,

    /// Selected hash → first k-gram position with that hash
    fingerprints: FxHashMap<u64, usize>,
}

impl SemanticProfile {
    pub fn canonical(&self) -> &[String] {
        &self.canonical
    }

    /// Number of distinct selected fingerprints
    pub fn fingerprint_count(&self) -> usize {
        self.fingerprints.len()
    }
}

/// Outcome of a semantic comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticComparison {
    /// Verified fingerprints present on both sides
    pub shared: usize,
    pub fingerprints_a: usize,
    pub fingerprints_b: usize,
    pub score: f64,
}

/// Semantic scorer configured for one run
#[derive(Debug, Clone, Copy)]
pub struct SemanticScorer {
    k_gram_size: usize,
    winnow_window_size: usize,
}

impl Default for SemanticScorer {
    fn default() -> Self {
        Self::new(&RunConfig::default())
    }
}

impl SemanticScorer {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            k_gram_size: config.k_gram_size.max(1),
            winnow_window_size: config.winnow_window_size.max(1),
        }
    }

    /// Canonicalize and fingerprint a stream, computed once per file
    pub fn profile(&self, stream: &TokenStream) -> SemanticProfile {
        let canonical = canonicalize(stream);
        let symbols: Vec<u64> = canonical
            .iter()
            .map(|c| symbol_hash(SEMANTIC_SEED, &[c.as_str()]))
            .collect();

        let mut fingerprints = FxHashMap::default();
        for fp in winnow(
            &kgram_hashes(&symbols, self.k_gram_size),
            self.winnow_window_size,
        ) {
            fingerprints.entry(fp.hash).or_insert(fp.position);
        }

        SemanticProfile {
            canonical,
            fingerprints,
        }
    }

    /// Score two profiles
    ///
    /// `score = (shared / |A| + shared / |B|) / 2` over distinct selected
    /// fingerprints, each shared hash confirmed by comparing the canonical
    /// k-grams. Equal non-empty canonical streams score 1 at any length;
    /// otherwise files with fewer than `k` tokens score 0.
    pub fn compare(&self, a: &SemanticProfile, b: &SemanticProfile) -> SemanticComparison {
        let k = self.k_gram_size;
        let (count_a, count_b) = (a.fingerprints.len(), b.fingerprints.len());
        if !a.canonical.is_empty() && a.canonical == b.canonical {
            return SemanticComparison {
                shared: count_a,
                fingerprints_a: count_a,
                fingerprints_b: count_b,
                score: 1.0,
            };
        }
        if a.canonical.len() < k || b.canonical.len() < k || count_a == 0 || count_b == 0 {
            return SemanticComparison {
                shared: 0,
                fingerprints_a: count_a,
                fingerprints_b: count_b,
                score: 0.0,
            };
        }

        let shared = a
            .fingerprints
            .iter()
            .filter(|&(hash, &pos_a)| {
                b.fingerprints.get(hash).is_some_and(|&pos_b| {
                    match (a.canonical.get(pos_a..pos_a + k), b.canonical.get(pos_b..pos_b + k)) {
                        (Some(gram_a), Some(gram_b)) => gram_a == gram_b,
                        _ => false,
                    }
                })
            })
            .count();

        let score = (shared as f64 / count_a as f64 + shared as f64 / count_b as f64) / 2.0;
        SemanticComparison {
            shared,
            fingerprints_a: count_a,
            fingerprints_b: count_b,
            score: score.clamp(0.0, 1.0),
        }
    }

    /// Profile and score two streams
    pub fn compare_streams(&self, a: &TokenStream, b: &TokenStream) -> SemanticComparison {
        self.compare(&self.profile(a), &self.profile(b))
    }
}

/// Semantic score of two streams with the default configuration
pub fn compare_semantics(a: &TokenStream, b: &TokenStream) -> f64 {
    SemanticScorer::default().compare_streams(a, b).score
}
