//! Core data types
//!
//! - `SourceRange`: row/column range in an original file
//! - `SourceFile`: one submission's content plus metadata
//! - `Language`: supported source languages
//! - `TemplateCode`: instructor-provided starter code

mod source_file;
mod span;

pub use source_file::{AssignmentId, Language, SourceFile, StudentId, SubmissionId, TemplateCode};
pub use span::{Position, SourceRange};
