//! Feature slices, leaves first
//!
//! ```text
//! tokenization ─┬─> fingerprint ─┬─> structural ─┐
//!               │                └─> semantic ───┼─> hybrid ─> report
//!               └────────────────────────────────┘
//! ```

pub mod fingerprint;
pub mod hybrid;
pub mod report;
pub mod semantic;
pub mod structural;
pub mod tokenization;
