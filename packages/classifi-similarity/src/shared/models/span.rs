//! Source location types
//!
//! Rows and columns are 0-based. Columns count characters, not bytes.
//! `end_col` is exclusive: a token `abc` at the start of row 2 spans `2:0-2:3`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single position in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// Range in an original source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl SourceRange {
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    pub fn between(start: Position, end: Position) -> Self {
        Self::new(start.row, start.col, end.row, end.col)
    }

    pub fn start(&self) -> Position {
        Position::new(self.start_row, self.start_col)
    }

    pub fn end(&self) -> Position {
        Position::new(self.end_row, self.end_col)
    }

    /// Smallest range covering both `self` and `other`
    pub fn merge(&self, other: &SourceRange) -> SourceRange {
        SourceRange::between(self.start().min(other.start()), self.end().max(other.end()))
    }

    /// True when the two ranges share at least one character
    pub fn overlaps(&self, other: &SourceRange) -> bool {
        self.start() < other.end() && other.start() < self.end()
    }

    pub fn contains(&self, other: &SourceRange) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }

    pub fn row_count(&self) -> u32 {
        self.end_row.saturating_sub(self.start_row) + 1
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start_row, self.start_col, self.end_row, self.end_col
        )
    }
}
