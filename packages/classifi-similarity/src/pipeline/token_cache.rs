//! Per-run token cache
//!
//! Lock-free map from submission id to the tokenized file and its
//! fingerprints. Each key is written exactly once by the worker that owns the
//! file; afterwards entries are only read, shared through `Arc`.

use crate::features::semantic::{SemanticProfile, SemanticScorer};
use crate::features::structural::{StreamFingerprints, StructuralMatcher};
use crate::features::tokenization::TokenStream;
use crate::shared::models::{StudentId, SubmissionId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// A tokenized file with everything pair workers need
#[derive(Debug)]
pub struct CachedFile {
    pub submission_id: SubmissionId,
    pub student_id: StudentId,
    pub stream: TokenStream,
    pub structural: StreamFingerprints,
    pub semantic: SemanticProfile,
}

impl CachedFile {
    /// Fingerprint a stream for both scorers
    pub fn new(
        submission_id: SubmissionId,
        student_id: StudentId,
        stream: TokenStream,
        matcher: &StructuralMatcher,
        scorer: &SemanticScorer,
    ) -> Self {
        let structural = matcher.fingerprint(&stream);
        let semantic = scorer.profile(&stream);
        Self {
            submission_id,
            student_id,
            stream,
            structural,
            semantic,
        }
    }
}

/// Write-once cache keyed by submission id
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: DashMap<SubmissionId, Arc<CachedFile>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
        }
    }

    /// Insert a file unless its id is already present
    ///
    /// Returns `false` (and keeps the first entry) on a second write.
    pub fn insert(&self, file: CachedFile) -> bool {
        match self.entries.entry(file.submission_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(file));
                true
            }
        }
    }

    pub fn get(&self, id: SubmissionId) -> Option<Arc<CachedFile>> {
        self.entries.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, id: SubmissionId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tokenization::tokenize;
    use crate::shared::models::Language;
    use rayon::prelude::*;

    fn cached(id: SubmissionId, source: &str) -> CachedFile {
        CachedFile::new(
            id,
            id * 10,
            tokenize(source, Language::Python, None).unwrap(),
            &StructuralMatcher::default(),
            &SemanticScorer::default(),
        )
    }

    #[test]
    fn test_second_write_is_ignored() {
        let cache = TokenCache::new();
        assert!(cache.insert(cached(1, "a = 1")));
        assert!(!cache.insert(cached(1, "b = 2 + 3")));
        assert_eq!(cache.get(1).map(|f| f.stream.len()), Some(3));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_parallel_fill() {
        let cache = TokenCache::with_capacity(64);
        (0..64i64).into_par_iter().for_each(|id| {
            cache.insert(cached(id, "total = total + 1"));
        });
        assert_eq!(cache.len(), 64);
        assert!(cache.contains(63));
        assert!(cache.get(64).is_none());
    }
}
