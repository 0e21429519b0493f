mod pair_result;
mod report;
mod student_summary;
mod warning;

pub use pair_result::PairResult;
pub(crate) use pair_result::PairSide;
pub use report::{Report, RunStats, SubmissionRef};
pub use student_summary::{PeerMatch, StudentSummary};
pub use warning::{AnalysisWarning, WarningKind};
