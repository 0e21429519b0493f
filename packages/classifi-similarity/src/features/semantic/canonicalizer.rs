//! Identifier and literal canonicalization
//!
//! - Identifier → `$d`, with `d` the number of identifier occurrences back
//!   to the previous use of the same name (`$0` on first use)
//! - Number / string / char literal → `<num>` / `<str>` / `<chr>`
//! - Keywords and operators are kept as written
//!
//! Distances are unchanged by any consistent renaming, so two files that differ
//! only in their choice of names canonicalize identically.
//!
//! # Example
//!
//! ```text
//! total = total + 1     →   $0 = $1 + <num>
//! acc   = acc   + 1     →   $0 = $1 + <num>
//! ```

use crate::features::tokenization::{TokenKind, TokenStream};
use rustc_hash::FxHashMap;

pub const NUMBER_PLACEHOLDER: &str = "<num>";
pub const STRING_PLACEHOLDER: &str = "<str>";
pub const CHAR_PLACEHOLDER: &str = "<chr>";

/// Canonical form of every token in the stream, one entry per token
pub fn canonicalize(stream: &TokenStream) -> Vec<String> {
    let mut last_seen: FxHashMap<&str, usize> = FxHashMap::default();
    let mut identifier_count = 0usize;

    stream
        .iter()
        .map(|token| match token.kind {
            TokenKind::Identifier => {
                let distance = last_seen
                    .insert(token.text.as_str(), identifier_count)
                    .map_or(0, |previous| identifier_count - previous);
                identifier_count += 1;
                format!("${}", distance)
            }
            TokenKind::Number => NUMBER_PLACEHOLDER.to_string(),
            TokenKind::String => STRING_PLACEHOLDER.to_string(),
            TokenKind::Char => CHAR_PLACEHOLDER.to_string(),
            TokenKind::Keyword | TokenKind::Operator => token.text.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::tokenization::tokenize;
    use crate::shared::models::Language;
    use pretty_assertions::assert_eq;

    fn canon(source: &str, language: Language) -> Vec<String> {
        canonicalize(&tokenize(source, language, None).unwrap())
    }

    #[test]
    fn test_back_reference_distances() {
        assert_eq!(
            canon("total = total + 1", Language::Python),
            vec!["$0", "=", "$1", "+", "<num>"]
        );
        assert_eq!(
            canon("a = b\nb = a", Language::Python),
            vec!["$0", "=", "$0", "$1", "=", "$3"]
        );
    }

    #[test]
    fn test_consistent_rename_is_invisible() {
        let original = "int sum(int x, int y) { int z = x + y; return z; }";
        let renamed = "int add(int p, int q) { int r = p + q; return r; }";
        assert_eq!(canon(original, Language::C), canon(renamed, Language::C));
    }

    #[test]
    fn test_literals_tagged_by_type() {
        assert_eq!(
            canon("char c = 'a'; String s = \"hi\"; int n = 42;", Language::Java),
            vec![
                "char", "$0", "=", "<chr>", ";", "$0", "$0", "=", "<str>", ";", "int", "$0", "=",
                "<num>", ";"
            ]
        );
    }

    #[test]
    fn test_keywords_kept() {
        let canonical = canon("while True:\n    pass\n", Language::Python);
        assert_eq!(canonical, vec!["while", "True", ":", "pass"]);
    }
}
