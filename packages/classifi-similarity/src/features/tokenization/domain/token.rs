//! Token and token stream representation

use crate::shared::models::{Language, SourceRange};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical class of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    String,
    Char,
    Operator,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Keyword => "keyword",
            Self::Number => "number",
            Self::String => "string",
            Self::Char => "char",
            Self::Operator => "operator",
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Number | Self::String | Self::Char)
    }
}

/// A single salient token with its position in the original file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,

    /// Token text as written in the source (string literals include quotes)
    pub text: String,

    pub range: SourceRange,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, range: SourceRange) -> Self {
        Self {
            kind,
            text: text.into(),
            range,
        }
    }

    /// Equality on kind and text, ignoring position
    pub fn same_lexeme(&self, other: &Token) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({}) @ {}", self.kind, self.text, self.range)
    }
}

/// Problem found while lexing, recovered from by resynchronization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexDiagnostic {
    pub row: u32,
    pub col: u32,
    pub message: String,
}

impl fmt::Display for LexDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.row, self.col, self.message)
    }
}

/// Canonical token stream of one file
///
/// Tokens are in strictly increasing position order. Comments, whitespace and
/// template-matching runs are already removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStream {
    pub language: Option<Language>,
    tokens: Vec<Token>,
    diagnostics: Vec<LexDiagnostic>,
    template_tokens_removed: usize,
}

impl TokenStream {
    pub fn new(language: Language, tokens: Vec<Token>) -> Self {
        Self {
            language: Some(language),
            tokens,
            diagnostics: Vec::new(),
            template_tokens_removed: 0,
        }
    }

    pub(crate) fn with_diagnostics(mut self, diagnostics: Vec<LexDiagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub(crate) fn with_template_tokens_removed(mut self, removed: usize) -> Self {
        self.template_tokens_removed = removed;
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn diagnostics(&self) -> &[LexDiagnostic] {
        &self.diagnostics
    }

    /// Number of tokens dropped because they matched the template
    pub fn template_tokens_removed(&self) -> usize {
        self.template_tokens_removed
    }

    /// Source range covered by `len` tokens starting at `start`
    ///
    /// Returns `None` for an empty or out-of-bounds run.
    pub fn range_of(&self, start: usize, len: usize) -> Option<SourceRange> {
        if len == 0 {
            return None;
        }
        let first = self.tokens.get(start)?;
        let last = self.tokens.get(start + len - 1)?;
        Some(SourceRange::between(first.range.start(), last.range.end()))
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, row: u32, col: u32) -> Token {
        Token::new(
            TokenKind::Identifier,
            text,
            SourceRange::new(row, col, row, col + text.chars().count() as u32),
        )
    }

    #[test]
    fn test_range_of_spans_tokens() {
        let stream = TokenStream::new(
            Language::Python,
            vec![token("a", 0, 0), token("bb", 0, 2), token("ccc", 1, 4)],
        );
        assert_eq!(stream.range_of(0, 3), Some(SourceRange::new(0, 0, 1, 7)));
        assert_eq!(stream.range_of(1, 1), Some(SourceRange::new(0, 2, 0, 4)));
        assert_eq!(stream.range_of(2, 2), None);
        assert_eq!(stream.range_of(0, 0), None);
    }

    #[test]
    fn test_same_lexeme_ignores_position() {
        assert!(token("x", 0, 0).same_lexeme(&token("x", 5, 9)));
        assert!(!token("x", 0, 0).same_lexeme(&token("y", 0, 0)));
    }
}
