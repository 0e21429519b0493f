//! Submission input types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Database id of a submission
pub type SubmissionId = i64;

/// Database id of the student owning a submission
pub type StudentId = i64;

/// Database id of an assignment
pub type AssignmentId = i64;

/// Supported source languages
///
/// The language only selects lexical rules (comment syntax, literal delimiters,
/// keyword table). No grammar is involved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    C,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Java => "java",
            Self::C => "c",
        }
    }

    /// Map a file extension (with or without the leading dot) to a language
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "py" => Some(Self::Python),
            "java" => Some(Self::Java),
            "c" | "h" => Some(Self::C),
            _ => None,
        }
    }

    /// Guess the language from a file name's extension
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        Self::from_extension(ext)
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            "c" => Ok(Self::C),
            other => Err(format!(
                "Unknown language '{}'. Valid languages: python, java, c",
                other
            )),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submission's source file
///
/// Immutable once loaded. Choosing the latest submission per student is the
/// caller's job; the engine analyzes exactly the files it is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub submission_id: SubmissionId,
    pub student_id: StudentId,
    pub file_name: String,
    pub source_text: String,
    pub language: Language,
}

impl SourceFile {
    pub fn new(
        submission_id: SubmissionId,
        student_id: StudentId,
        file_name: impl Into<String>,
        source_text: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            submission_id,
            student_id,
            file_name: file_name.into(),
            source_text: source_text.into(),
            language,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.source_text.len()
    }

    pub fn line_count(&self) -> usize {
        self.source_text.lines().count()
    }
}

/// Instructor-provided starter code for an assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateCode {
    pub text: String,
    pub language: Language,
}

impl TemplateCode {
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }
}
