/*
 * Classifi Similarity - Pairwise Code-Similarity Engine
 *
 * Feature-First Architecture:
 * - shared/      : Common models (SourceFile, SourceRange, Language)
 * - features/    : Vertical slices (tokenization → fingerprint → structural/semantic → hybrid → report)
 * - pipeline/    : Token cache + pairwise orchestration
 * - api/         : Response DTOs
 * - config/      : Run configuration, presets, validation
 *
 * Parallelism:
 * - Per-run Rayon pool for tokenization and pair comparison
 * - DashMap write-once token cache
 */

#![allow(clippy::too_many_arguments)] // Pair comparison takes both sides explicitly
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Feature modules (tokenization → report)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Run configuration
pub mod config;

/// Response DTOs
pub mod api;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, Preset, RunConfig, Validatable};
pub use errors::{EngineError, Result};
pub use features::hybrid::{HybridCombiner, HybridScore};
pub use features::report::{
    AnalysisWarning, PairResult, Report, ResultDetails, StudentSummary, WarningKind,
};
pub use features::semantic::{compare_semantics, SemanticScorer};
pub use features::structural::{compare_structure, Fragment, StructuralComparison, StructuralMatcher};
pub use features::tokenization::{tokenize, Token, TokenKind, TokenStream, Tokenizer};
pub use pipeline::{run_analysis, AnalysisInput, PairwiseOrchestrator};
pub use shared::models::{
    AssignmentId, Language, SourceFile, SourceRange, StudentId, SubmissionId, TemplateCode,
};

/// Cancellation token accepted by [`PairwiseOrchestrator::new`]
pub use tokio_util::sync::CancellationToken;
