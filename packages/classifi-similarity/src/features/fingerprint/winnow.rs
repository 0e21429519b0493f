//! Winnowing fingerprint selection

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A selected k-gram hash and the index of its first symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint {
    pub hash: u64,
    pub position: usize,
}

/// Select fingerprints from k-gram hashes with window size `w`
///
/// Robust winnowing: in every window of `w` consecutive hashes the minimum is
/// selected, preferring the rightmost on ties, and a position is recorded
/// only once. Fewer than `w` hashes form a single window.
pub fn winnow(hashes: &[u64], w: usize) -> Vec<Fingerprint> {
    if hashes.is_empty() {
        return Vec::new();
    }
    let window = w.max(1).min(hashes.len());

    let mut selected = Vec::new();
    let mut last: Option<usize> = None;
    for start in 0..=hashes.len() - window {
        let mut min_pos = start;
        for pos in start..start + window {
            if hashes[pos] <= hashes[min_pos] {
                min_pos = pos;
            }
        }
        if last != Some(min_pos) {
            selected.push(Fingerprint {
                hash: hashes[min_pos],
                position: min_pos,
            });
            last = Some(min_pos);
        }
    }
    selected
}

/// Fingerprints of one stream indexed by hash
#[derive(Debug, Clone, Default)]
pub struct FingerprintIndex {
    positions: FxHashMap<u64, Vec<usize>>,
    count: usize,
}

impl FingerprintIndex {
    pub fn new(fingerprints: &[Fingerprint]) -> Self {
        let mut positions: FxHashMap<u64, Vec<usize>> = FxHashMap::default();
        for fp in fingerprints {
            positions.entry(fp.hash).or_default().push(fp.position);
        }
        Self {
            positions,
            count: fingerprints.len(),
        }
    }

    /// Positions of k-grams with this hash
    pub fn positions(&self, hash: u64) -> &[usize] {
        self.positions.get(&hash).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, hash: u64) -> bool {
        self.positions.contains_key(&hash)
    }

    /// Number of distinct hashes
    pub fn distinct(&self) -> usize {
        self.positions.len()
    }

    /// Number of indexed fingerprints
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn hashes(&self) -> impl Iterator<Item = u64> + '_ {
        self.positions.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winnow_selects_window_minima() {
        // classic example shape: minima 17 (pos 3), 8 (pos 6), 39 -> ...
        let hashes = [77, 74, 42, 17, 98, 50, 17, 98, 8, 88, 67, 39, 77, 74, 42, 17, 98];
        let fps = winnow(&hashes, 4);
        let positions: Vec<usize> = fps.iter().map(|f| f.position).collect();
        assert_eq!(positions, vec![3, 6, 8, 11, 15]);
        assert_eq!(fps[2].hash, 8);
    }

    #[test]
    fn test_every_window_has_a_fingerprint() {
        let hashes: Vec<u64> = (0..50).map(|i| (i * 7919 % 101) as u64).collect();
        let w = 4;
        let fps = winnow(&hashes, w);
        for start in 0..=hashes.len() - w {
            assert!(
                fps.iter()
                    .any(|f| f.position >= start && f.position < start + w),
                "window at {} has no fingerprint",
                start
            );
        }
    }

    #[test]
    fn test_short_input_single_window() {
        let fps = winnow(&[5, 3, 9], 10);
        assert_eq!(fps, vec![Fingerprint { hash: 3, position: 1 }]);
        assert!(winnow(&[], 4).is_empty());
    }

    #[test]
    fn test_index_lookup() {
        let index = FingerprintIndex::new(&[
            Fingerprint { hash: 1, position: 0 },
            Fingerprint { hash: 2, position: 3 },
            Fingerprint { hash: 1, position: 7 },
        ]);
        assert_eq!(index.positions(1), &[0, 7]);
        assert_eq!(index.positions(9), &[] as &[usize]);
        assert_eq!(index.distinct(), 2);
        assert_eq!(index.len(), 3);
    }
}
