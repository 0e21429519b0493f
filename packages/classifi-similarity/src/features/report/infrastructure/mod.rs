mod records;

pub use records::{to_percent, SimilarityReportRecord, SimilarityResultRecord};
