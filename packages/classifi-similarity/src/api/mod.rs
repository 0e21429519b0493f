//! Externally observed response shapes
//!
//! Plain `serde` DTOs built from a `Report`; transport is the caller's concern.

pub mod dto;

pub use dto::{
    AnalyzeResponse, AnalyzeSummary, BestMatchResponse, FileResponse, FragmentResponse,
    PairResponse, ResultDetailsResponse, StudentSummaryResponse,
};
