//! Hybrid Combiner

pub mod combiner;

pub use combiner::{clamp01, HybridCombiner, HybridScore};
