//! Pairwise analysis pipeline
//!
//! - `TokenCache`: per-run, write-once cache of tokenized files
//! - `PairwiseOrchestrator`: tokenize once, compare every eligible pair,
//!   aggregate into a `Report`

pub mod orchestrator;
pub mod token_cache;

pub use orchestrator::{run_analysis, AnalysisInput, PairwiseOrchestrator};
pub use token_cache::{CachedFile, TokenCache};
