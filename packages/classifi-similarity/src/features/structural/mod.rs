//! Structural Matcher
//!
//! Localizes shared token runs between two streams and turns them into
//! coverage ratios and position-mapped fragments.

pub mod fragment;
pub mod matcher;

pub use fragment::Fragment;
pub use matcher::{compare_structure, StreamFingerprints, StructuralComparison, StructuralMatcher};
