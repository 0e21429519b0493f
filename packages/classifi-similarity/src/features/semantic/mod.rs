//! Semantic Scorer
//!
//! Rename-resistant similarity: identifiers and literals are canonicalized,
//! then the canonical streams are compared by winnowed k-gram overlap in a
//! hash space of their own.

pub mod canonicalizer;
pub mod scorer;

pub use canonicalizer::{canonicalize, CHAR_PLACEHOLDER, NUMBER_PLACEHOLDER, STRING_PLACEHOLDER};
pub use scorer::{compare_semantics, SemanticComparison, SemanticProfile, SemanticScorer};
