//! Tokenization domain models

pub mod language_rules;
pub mod token;

pub use language_rules::{LanguageRules, StringRule};
pub use token::{LexDiagnostic, Token, TokenKind, TokenStream};
