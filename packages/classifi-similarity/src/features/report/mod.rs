//! Report Aggregator
//!
//! Domain types for pair results and run reports, the aggregator that builds
//! a `Report` from pair results, per-student summaries, side-by-side details
//! and persistence-shaped records.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{slice_range, summarize, ReportAggregator, ResultDetails};
pub use domain::{
    AnalysisWarning, PairResult, PeerMatch, Report, RunStats, StudentSummary, SubmissionRef,
    WarningKind,
};
pub use infrastructure::{to_percent, SimilarityReportRecord, SimilarityResultRecord};
