//! Tokenizer entry point
//!
//! Applies the run's size cap, lexes with the language's rule table, decides
//! whether lex diagnostics are fatal for the file, and strips template runs.

use super::lexer::lex;
use super::template_filter::TemplateFilter;
use crate::config::RunConfig;
use crate::errors::{EngineError, Result};
use crate::features::tokenization::domain::{LanguageRules, TokenStream};
use crate::shared::models::{Language, TemplateCode};
use tracing::debug;

/// Tokenizer configured for one run
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    max_file_bytes: usize,
    template_min_match: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::from_config(&RunConfig::default())
    }
}

impl Tokenizer {
    pub fn new(max_file_bytes: usize, template_min_match: usize) -> Self {
        Self {
            max_file_bytes,
            template_min_match,
        }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.max_file_bytes, config.template_min_match)
    }

    /// Tokenize one file, stripping runs that match `template`
    ///
    /// The template is only applied when its language matches. Errors:
    /// - `FileTooLarge` when `source` exceeds the size cap
    /// - `Lex` when recovery from malformed input leaves no usable token
    ///
    /// A file that is empty (or becomes empty through template stripping)
    /// is not an error.
    pub fn tokenize(
        &self,
        source: &str,
        language: Language,
        template: Option<&TemplateFilter>,
        template_language: Option<Language>,
    ) -> Result<TokenStream> {
        let stream = self.lex_checked(source, language)?;

        let filter = match (template, template_language) {
            (Some(filter), Some(lang)) if lang == language && !filter.is_empty() => filter,
            _ => return Ok(stream),
        };

        let diagnostics = stream.diagnostics().to_vec();
        let (kept, removed) = filter.strip(stream.into_tokens());
        if removed > 0 {
            debug!(removed, kept = kept.len(), "stripped template tokens");
        }
        Ok(TokenStream::new(language, kept)
            .with_diagnostics(diagnostics)
            .with_template_tokens_removed(removed))
    }

    /// Tokenize the assignment template into a reusable filter
    pub fn template_filter(&self, template: &TemplateCode) -> Result<TemplateFilter> {
        let stream = self.lex_checked(&template.text, template.language)?;
        Ok(TemplateFilter::new(
            stream.into_tokens(),
            self.template_min_match,
        ))
    }

    fn lex_checked(&self, source: &str, language: Language) -> Result<TokenStream> {
        if source.len() > self.max_file_bytes {
            return Err(EngineError::FileTooLarge {
                submission_id: None,
                size: source.len(),
                limit: self.max_file_bytes,
            });
        }

        let out = lex(source, LanguageRules::for_language(language));

        if out.tokens.is_empty() {
            if let Some(first) = out.diagnostics.first() {
                return Err(EngineError::Lex {
                    submission_id: None,
                    row: first.row,
                    col: first.col,
                    message: first.message.clone(),
                });
            }
        }

        Ok(TokenStream::new(language, out.tokens).with_diagnostics(out.diagnostics))
    }
}

/// Tokenize with default limits
///
/// Convenience wrapper over [`Tokenizer`] for one-off use.
pub fn tokenize(
    source: &str,
    language: Language,
    template: Option<&TemplateCode>,
) -> Result<TokenStream> {
    let tokenizer = Tokenizer::default();
    match template {
        Some(template) => {
            let filter = tokenizer.template_filter(template)?;
            tokenizer.tokenize(source, language, Some(&filter), Some(template.language))
        }
        None => tokenizer.tokenize(source, language, None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tokenization::domain::TokenKind;

    #[test]
    fn test_file_too_large() {
        let tokenizer = Tokenizer::new(8, 5);
        let err = tokenizer
            .tokenize("x = 1 + 2 + 3", Language::Python, None, None)
            .unwrap_err();
        assert!(matches!(err, EngineError::FileTooLarge { size: 13, limit: 8, .. }));
    }

    #[test]
    fn test_lex_error_when_nothing_usable() {
        let err = tokenize("\"unterminated", Language::Java, None).unwrap_err();
        assert!(matches!(err, EngineError::Lex { row: 0, col: 0, .. }));
    }

    #[test]
    fn test_recovered_file_keeps_diagnostics() {
        let stream = tokenize("x = 1\ny = 'oops\n", Language::Python, None).unwrap();
        assert_eq!(stream.diagnostics().len(), 1);
        assert_eq!(stream.len(), 5);
    }

    #[test]
    fn test_comment_only_file_is_empty_not_error() {
        let stream = tokenize("# nothing here\n", Language::Python, None).unwrap();
        assert!(stream.is_empty());
    }

    #[test]
    fn test_template_equal_to_file_yields_empty_stream() {
        let source = "public class Main {\n  public static void main(String[] a) {}\n}\n";
        let template = TemplateCode::new(source, Language::Java);
        let stream = tokenize(source, Language::Java, Some(&template)).unwrap();
        assert!(stream.is_empty());
        assert!(stream.template_tokens_removed() > 0);
    }

    #[test]
    fn test_template_ignored_for_other_language() {
        let template = TemplateCode::new("x = 1", Language::Python);
        let stream = tokenize("x = 1;", Language::C, Some(&template)).unwrap();
        assert_eq!(stream.len(), 4);
        assert_eq!(stream.template_tokens_removed(), 0);
    }

    #[test]
    fn test_whitespace_and_comments_do_not_change_tokens() {
        let a = tokenize("int add(int a,int b){return a+b;}", Language::C, None).unwrap();
        let b = tokenize(
            "int add(int a, int b) {\n  /* sum */\n  return a + b; // done\n}\n",
            Language::C,
            None,
        )
        .unwrap();
        let kinds_a: Vec<(TokenKind, &str)> =
            a.iter().map(|t| (t.kind, t.text.as_str())).collect();
        let kinds_b: Vec<(TokenKind, &str)> =
            b.iter().map(|t| (t.kind, t.text.as_str())).collect();
        assert_eq!(kinds_a, kinds_b);
    }
}
