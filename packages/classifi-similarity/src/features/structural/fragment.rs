//! Matching fragment between two files

use crate::shared::models::SourceRange;
use serde::{Deserialize, Serialize};

/// One contiguous matching region between a left and a right file
///
/// `left_start`/`right_start` index into the token streams the fragment was
/// found in; the ranges point into the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub left_range: SourceRange,
    pub right_range: SourceRange,

    /// Length in tokens
    pub length: usize,

    pub left_start: usize,
    pub right_start: usize,
}

impl Fragment {
    /// Same fragment seen from the other file
    pub fn swapped(&self) -> Fragment {
        Fragment {
            left_range: self.right_range,
            right_range: self.left_range,
            length: self.length,
            left_start: self.right_start,
            right_start: self.left_start,
        }
    }

    /// Token index range on the left side
    pub fn left_tokens(&self) -> std::ops::Range<usize> {
        self.left_start..self.left_start + self.length
    }

    /// Token index range on the right side
    pub fn right_tokens(&self) -> std::ops::Range<usize> {
        self.right_start..self.right_start + self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swapped_twice_is_identity() {
        let fragment = Fragment {
            left_range: SourceRange::new(0, 0, 2, 5),
            right_range: SourceRange::new(4, 1, 6, 3),
            length: 12,
            left_start: 0,
            right_start: 30,
        };
        let swapped = fragment.swapped();
        assert_eq!(swapped.left_range, fragment.right_range);
        assert_eq!(swapped.right_tokens(), 0..12);
        assert_eq!(swapped.swapped(), fragment);
    }
}
