//! Tokenization infrastructure
//!
//! - `lexer`: table-driven scan producing raw tokens and diagnostics
//! - `template_filter`: strips runs that reproduce the assignment template
//! - `tokenizer`: size cap, error policy, template application

pub(crate) mod lexer;
pub mod template_filter;
pub mod tokenizer;

pub use template_filter::TemplateFilter;
pub use tokenizer::{tokenize, Tokenizer};
