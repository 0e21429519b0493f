//! Per-language lexical rule tables
//!
//! One lexer serves every language; these tables are the only thing that
//! varies. Adding a language means adding a table, not a lexer.

use crate::shared::models::Language;
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// A string literal form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringRule {
    pub open: &'static str,
    pub close: &'static str,

    /// Whether a raw newline may appear before the closing delimiter
    pub multiline: bool,
}

/// Lexical rules of one language
#[derive(Debug)]
pub struct LanguageRules {
    pub language: Language,
    pub line_comments: &'static [&'static str],
    pub block_comments: &'static [(&'static str, &'static str)],

    /// Checked in order, so longer delimiters come first
    pub strings: &'static [StringRule],

    /// Quote for character literals, if the language has them
    pub char_quote: Option<char>,

    /// Identifier prefixes that turn a following quote into a string (`r"..."`)
    pub string_prefixes: &'static [&'static str],

    /// Whether `$` may appear in identifiers
    pub dollar_in_identifiers: bool,

    /// Multi-character operators, longest first
    pub operators: &'static [&'static str],

    keywords: FxHashSet<&'static str>,
}

impl LanguageRules {
    /// Rule table for a language
    pub fn for_language(language: Language) -> &'static LanguageRules {
        match language {
            Language::Python => &PYTHON,
            Language::Java => &JAVA,
            Language::C => &C,
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn is_string_prefix(&self, word: &str) -> bool {
        self.string_prefixes
            .iter()
            .any(|p| p.eq_ignore_ascii_case(word))
    }
}

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield", "match", "case",
];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "try", "void", "volatile", "while", "var", "record",
    "yield", "true", "false", "null",
];

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch",
    "typedef", "union", "unsigned", "void", "volatile", "while", "_Bool", "_Complex",
    "_Imaginary", "NULL", "include", "define", "ifdef", "ifndef", "endif", "pragma",
];

const PYTHON_OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "->", ":=", "**", "//", "==", "!=", "<=", ">=", "<<",
    ">>", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "@=",
];

const JAVA_OPERATORS: &[&str] = &[
    ">>>=", ">>>", "<<=", ">>=", "...", "->", "::", "++", "--", "&&", "||", "==", "!=", "<=",
    ">=", "<<", ">>", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=",
];

const C_OPERATORS: &[&str] = &[
    "<<=", ">>=", "...", "->", "++", "--", "&&", "||", "==", "!=", "<=", ">=", "<<", ">>",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "##",
];

static PYTHON: Lazy<LanguageRules> = Lazy::new(|| LanguageRules {
    language: Language::Python,
    line_comments: &["#"],
    block_comments: &[],
    strings: &[
        StringRule {
            open: "\"\"\"",
            close: "\"\"\"",
            multiline: true,
        },
        StringRule {
            open: "'''",
            close: "'''",
            multiline: true,
        },
        StringRule {
            open: "\"",
            close: "\"",
            multiline: false,
        },
        StringRule {
            open: "'",
            close: "'",
            multiline: false,
        },
    ],
    char_quote: None,
    string_prefixes: &["r", "b", "u", "f", "rb", "br", "fr", "rf"],
    dollar_in_identifiers: false,
    operators: PYTHON_OPERATORS,
    keywords: PYTHON_KEYWORDS.iter().copied().collect(),
});

static JAVA: Lazy<LanguageRules> = Lazy::new(|| LanguageRules {
    language: Language::Java,
    line_comments: &["//"],
    block_comments: &[("/*", "*/")],
    strings: &[
        StringRule {
            open: "\"\"\"",
            close: "\"\"\"",
            multiline: true,
        },
        StringRule {
            open: "\"",
            close: "\"",
            multiline: false,
        },
    ],
    char_quote: Some('\''),
    string_prefixes: &[],
    dollar_in_identifiers: true,
    operators: JAVA_OPERATORS,
    keywords: JAVA_KEYWORDS.iter().copied().collect(),
});

static C: Lazy<LanguageRules> = Lazy::new(|| LanguageRules {
    language: Language::C,
    line_comments: &["//"],
    block_comments: &[("/*", "*/")],
    strings: &[StringRule {
        open: "\"",
        close: "\"",
        multiline: false,
    }],
    char_quote: Some('\''),
    string_prefixes: &["L", "u8", "u", "U"],
    dollar_in_identifiers: false,
    operators: C_OPERATORS,
    keywords: C_KEYWORDS.iter().copied().collect(),
});
