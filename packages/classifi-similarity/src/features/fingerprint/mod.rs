//! Fingerprinting (k-gram hashing + winnowing)
//!
//! Shared by the structural matcher and the semantic scorer. Each caller
//! hashes its own symbols with its own seed, so the two scorers live in
//! separate hash spaces while running the same machinery.
//!
//! Winnowing keeps the minimal hash of every window of `w` consecutive
//! k-gram hashes (rightmost on ties). Any shared run of at least `k + w - 1`
//! symbols yields at least one common fingerprint.

pub mod kgram;
pub mod winnow;

pub use kgram::{kgram_hashes, symbol_hash, SEMANTIC_SEED, STRUCTURAL_SEED};
pub use winnow::{winnow, Fingerprint, FingerprintIndex};
