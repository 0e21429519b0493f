//! Tokenizer / Normalizer
//!
//! Turns one raw source file into a `TokenStream`: comments and whitespace
//! dropped, one token per identifier, keyword, literal and operator, each with
//! its original row/column range. Tokens matching the assignment template are
//! stripped so starter code never counts as evidence.
//!
//! # Usage
//!
//! ```
//! use classifi_similarity::features::tokenization::tokenize;
//! use classifi_similarity::shared::models::Language;
//!
//! let stream = tokenize("x = 1  # set x\n", Language::Python, None).unwrap();
//! assert_eq!(stream.len(), 3);
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{LanguageRules, LexDiagnostic, Token, TokenKind, TokenStream};
pub use infrastructure::{tokenize, TemplateFilter, Tokenizer};
