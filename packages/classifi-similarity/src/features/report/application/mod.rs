mod aggregator;
mod details;

pub use aggregator::{summarize, ReportAggregator};
pub use details::{slice_range, ResultDetails};
