//! Table-driven lexer
//!
//! # Algorithm
//!
//! Single forward scan over the characters of the file:
//! 1. Whitespace and comments are skipped
//! 2. String / char literals are consumed up to their closing delimiter
//! 3. Identifiers become `Keyword` or `Identifier` via the keyword table
//! 4. Operators use longest match against the language's operator list;
//!    any other non-whitespace character is a one-character operator
//!
//! Unterminated strings and block comments are recorded as diagnostics and
//! the scan resynchronizes at the next whitespace character.

use crate::features::tokenization::domain::{
    LanguageRules, LexDiagnostic, StringRule, Token, TokenKind,
};
use crate::shared::models::{Position, SourceRange};

/// Character cursor with row/column tracking
struct Cursor {
    chars: Vec<char>,
    pos: usize,
    row: u32,
    col: u32,
}

impl Cursor {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            row: 0,
            col: 0,
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.row += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            if self.bump().is_none() {
                break;
            }
        }
    }

    fn starts_with(&self, pattern: &str) -> bool {
        let mut offset = 0;
        for expected in pattern.chars() {
            if self.peek_at(offset) != Some(expected) {
                return false;
            }
            offset += 1;
        }
        true
    }

    fn text_since(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    /// Skip everything up to (not including) the next whitespace character
    fn skip_to_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }
}

/// Output of a raw lexing pass, before template stripping
#[derive(Debug, Default)]
pub(crate) struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<LexDiagnostic>,
}

/// Lex one source text with the given rule table
pub(crate) fn lex(source: &str, rules: &LanguageRules) -> LexOutput {
    let mut cursor = Cursor::new(source);
    let mut out = LexOutput::default();

    while let Some(c) = cursor.peek() {
        if c.is_whitespace() {
            cursor.bump();
            continue;
        }

        if let Some(prefix) = rules.line_comments.iter().find(|p| cursor.starts_with(p)) {
            cursor.bump_n(prefix.chars().count());
            while let Some(c) = cursor.peek() {
                if c == '\n' {
                    break;
                }
                cursor.bump();
            }
            continue;
        }

        if let Some((open, close)) = rules
            .block_comments
            .iter()
            .find(|(open, _)| cursor.starts_with(open))
        {
            lex_block_comment(&mut cursor, open, close, &mut out);
            continue;
        }

        if let Some(rule) = rules.strings.iter().find(|r| cursor.starts_with(r.open)) {
            let start = cursor.position();
            let start_idx = cursor.pos;
            lex_string(&mut cursor, rule, start, start_idx, TokenKind::String, &mut out);
            continue;
        }

        if rules.char_quote == Some(c) {
            let rule = StringRule {
                open: "'",
                close: "'",
                multiline: false,
            };
            let start = cursor.position();
            let start_idx = cursor.pos;
            lex_string(&mut cursor, &rule, start, start_idx, TokenKind::Char, &mut out);
            continue;
        }

        if is_identifier_start(c, rules) {
            lex_word(&mut cursor, rules, &mut out);
            continue;
        }

        if c.is_ascii_digit() || (c == '.' && cursor.peek_at(1).map_or(false, |n| n.is_ascii_digit()))
        {
            lex_number(&mut cursor, &mut out);
            continue;
        }

        lex_operator(&mut cursor, rules, &mut out);
    }

    out
}

fn is_identifier_start(c: char, rules: &LanguageRules) -> bool {
    c.is_alphabetic() || c == '_' || (rules.dollar_in_identifiers && c == '$')
}

fn is_identifier_continue(c: char, rules: &LanguageRules) -> bool {
    c.is_alphanumeric() || c == '_' || (rules.dollar_in_identifiers && c == '$')
}

fn lex_block_comment(cursor: &mut Cursor, open: &str, close: &str, out: &mut LexOutput) {
    let start = cursor.position();
    let resume_idx = cursor.pos;
    cursor.bump_n(open.chars().count());

    while !cursor.is_eof() {
        if cursor.starts_with(close) {
            cursor.bump_n(close.chars().count());
            return;
        }
        cursor.bump();
    }

    // Unterminated: rewind, drop the opener and resynchronize
    out.diagnostics.push(LexDiagnostic {
        row: start.row,
        col: start.col,
        message: format!("unterminated block comment (missing '{}')", close),
    });
    rewind(cursor, resume_idx, start);
    cursor.skip_to_whitespace();
}

fn lex_string(
    cursor: &mut Cursor,
    rule: &StringRule,
    start: Position,
    start_idx: usize,
    kind: TokenKind,
    out: &mut LexOutput,
) {
    cursor.bump_n(rule.open.chars().count());

    loop {
        match cursor.peek() {
            None => break,
            Some('\n') if !rule.multiline => break,
            Some('\\') => {
                cursor.bump();
                cursor.bump();
            }
            Some(_) if cursor.starts_with(rule.close) => {
                cursor.bump_n(rule.close.chars().count());
                let range = SourceRange::between(start, cursor.position());
                out.tokens
                    .push(Token::new(kind, cursor.text_since(start_idx), range));
                return;
            }
            Some(_) => {
                cursor.bump();
            }
        }
    }

    let what = if kind == TokenKind::Char {
        "character literal"
    } else {
        "string literal"
    };
    out.diagnostics.push(LexDiagnostic {
        row: start.row,
        col: start.col,
        message: format!("unterminated {} (missing '{}')", what, rule.close),
    });
    rewind(cursor, start_idx, start);
    cursor.skip_to_whitespace();
}

fn lex_word(cursor: &mut Cursor, rules: &LanguageRules, out: &mut LexOutput) {
    let start = cursor.position();
    let start_idx = cursor.pos;
    while let Some(c) = cursor.peek() {
        if !is_identifier_continue(c, rules) {
            break;
        }
        cursor.bump();
    }
    let word = cursor.text_since(start_idx);

    // Prefixed string such as r"..." or L"..."
    if rules.is_string_prefix(&word) {
        if let Some(rule) = rules.strings.iter().find(|r| cursor.starts_with(r.open)) {
            lex_string(cursor, rule, start, start_idx, TokenKind::String, out);
            return;
        }
    }

    let kind = if rules.is_keyword(&word) {
        TokenKind::Keyword
    } else {
        TokenKind::Identifier
    };
    let range = SourceRange::between(start, cursor.position());
    out.tokens.push(Token::new(kind, word, range));
}

fn lex_number(cursor: &mut Cursor, out: &mut LexOutput) {
    let start = cursor.position();
    let start_idx = cursor.pos;
    let mut prev = '\0';
    while let Some(c) = cursor.peek() {
        let exponent_sign = (c == '+' || c == '-') && matches!(prev, 'e' | 'E' | 'p' | 'P');
        let digit_separator = c == '\'' && prev.is_ascii_digit() && cursor.peek_at(1).map_or(false, |n| n.is_ascii_digit());
        if c.is_ascii_alphanumeric() || c == '_' || c == '.' || digit_separator || exponent_sign {
            prev = c;
            cursor.bump();
        } else {
            break;
        }
    }
    let range = SourceRange::between(start, cursor.position());
    out.tokens
        .push(Token::new(TokenKind::Number, cursor.text_since(start_idx), range));
}

fn lex_operator(cursor: &mut Cursor, rules: &LanguageRules, out: &mut LexOutput) {
    let start = cursor.position();
    let start_idx = cursor.pos;
    match rules.operators.iter().find(|op| cursor.starts_with(op)) {
        Some(op) => cursor.bump_n(op.chars().count()),
        None => {
            cursor.bump();
        }
    }
    let range = SourceRange::between(start, cursor.position());
    out.tokens
        .push(Token::new(TokenKind::Operator, cursor.text_since(start_idx), range));
}

fn rewind(cursor: &mut Cursor, idx: usize, position: Position) {
    cursor.pos = idx;
    cursor.row = position.row;
    cursor.col = position.col;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Language;

    fn lex_texts(source: &str, language: Language) -> Vec<String> {
        lex(source, LanguageRules::for_language(language))
            .tokens
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_python_comments_and_strings() {
        let texts = lex_texts("x = 'a # b'  # trailing\nprint(x)\n", Language::Python);
        assert_eq!(texts, vec!["x", "=", "'a # b'", "print", "(", "x", ")"]);
    }

    #[test]
    fn test_python_triple_quoted_multiline() {
        let out = lex(
            "s = \"\"\"line one\nline two\"\"\"\ny = 2",
            LanguageRules::for_language(Language::Python),
        );
        assert!(out.diagnostics.is_empty());
        let s = &out.tokens[2];
        assert_eq!(s.kind, TokenKind::String);
        assert_eq!(s.range, SourceRange::new(0, 4, 1, 11));
        assert_eq!(out.tokens[3].text, "y");
        assert_eq!(out.tokens[3].range.start_row, 2);
    }

    #[test]
    fn test_python_prefixed_string() {
        let out = lex("p = r'\\d+'", LanguageRules::for_language(Language::Python));
        assert_eq!(out.tokens.len(), 3);
        assert_eq!(out.tokens[2].kind, TokenKind::String);
        assert_eq!(out.tokens[2].text, "r'\\d+'");
    }

    #[test]
    fn test_python_floor_division_is_operator() {
        assert_eq!(lex_texts("a // b", Language::Python), vec!["a", "//", "b"]);
    }

    #[test]
    fn test_java_block_comment_and_char() {
        let texts = lex_texts(
            "/* header */ char c = 'x'; // done\nint i = 0;",
            Language::Java,
        );
        assert_eq!(
            texts,
            vec!["char", "c", "=", "'x'", ";", "int", "i", "=", "0", ";"]
        );
    }

    #[test]
    fn test_keyword_classification() {
        let out = lex("for (int i = 0; i < n; i++)", LanguageRules::for_language(Language::C));
        assert_eq!(out.tokens[0].kind, TokenKind::Keyword);
        assert_eq!(out.tokens[2].kind, TokenKind::Keyword);
        assert_eq!(out.tokens[3].kind, TokenKind::Identifier);
        assert!(out.tokens.iter().any(|t| t.text == "++"));
    }

    #[test]
    fn test_longest_operator_match() {
        assert_eq!(
            lex_texts("x >>>= 2;", Language::Java),
            vec!["x", ">>>=", "2", ";"]
        );
        assert_eq!(lex_texts("p->next", Language::C), vec!["p", "->", "next"]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            lex_texts("a = 1.5e-3 + 0x1F + .5", Language::Python),
            vec!["a", "=", "1.5e-3", "+", "0x1F", "+", ".5"]
        );
    }

    #[test]
    fn test_unterminated_string_resynchronizes() {
        let out = lex(
            "print(\"hello world)\nx = 1\n",
            LanguageRules::for_language(Language::Python),
        );
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].row, 0);
        assert_eq!(out.diagnostics[0].col, 6);
        let texts: Vec<_> = out.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["print", "(", "world", ")", "x", "=", "1"]);
    }

    #[test]
    fn test_unterminated_block_comment_resynchronizes() {
        let out = lex("int a; /*oops\nint b;", LanguageRules::for_language(Language::C));
        assert_eq!(out.diagnostics.len(), 1);
        let texts: Vec<_> = out.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["int", "a", ";", "int", "b", ";"]);
    }

    #[test]
    fn test_positions_are_increasing() {
        let out = lex(
            "def f(a, b):\n    return a + b\n",
            LanguageRules::for_language(Language::Python),
        );
        for pair in out.tokens.windows(2) {
            assert!(pair[0].range.end() <= pair[1].range.start());
        }
    }

    #[test]
    fn test_unicode_columns_count_chars() {
        let out = lex("s = 'héllo'; t = 1", LanguageRules::for_language(Language::Python));
        let t = out.tokens.iter().find(|t| t.text == "t").unwrap();
        assert_eq!(t.range.start_col, 13);
    }
}
