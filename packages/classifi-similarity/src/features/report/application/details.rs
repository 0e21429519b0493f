//! Side-by-side details of one pair

use crate::features::report::domain::{PairResult, Report, SubmissionRef};
use crate::shared::models::{SourceFile, SourceRange, SubmissionId};
use serde::{Deserialize, Serialize};

/// Both original files of a pair plus its fragments, for highlighted diffs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDetails {
    pub pair: PairResult,
    pub left_file: SubmissionRef,
    pub right_file: SubmissionRef,
    pub left_code: String,
    pub right_code: String,
}

impl ResultDetails {
    /// Details for a pair of `report`, reading code from `files`
    ///
    /// `None` when the pair was not compared or a file is missing.
    pub fn build(
        report: &Report,
        a: SubmissionId,
        b: SubmissionId,
        files: &[SourceFile],
    ) -> Option<Self> {
        let pair = report.pair(a, b)?;
        let find = |id: SubmissionId| files.iter().find(|f| f.submission_id == id);
        let left = find(pair.submission1_id)?;
        let right = find(pair.submission2_id)?;
        Some(Self {
            pair: pair.clone(),
            left_file: SubmissionRef::from(left),
            right_file: SubmissionRef::from(right),
            left_code: left.source_text.clone(),
            right_code: right.source_text.clone(),
        })
    }

    /// Left and right source text of each fragment
    pub fn fragment_texts(&self) -> Vec<(String, String)> {
        self.pair
            .fragments
            .iter()
            .map(|f| {
                (
                    slice_range(&self.left_code, &f.left_range),
                    slice_range(&self.right_code, &f.right_range),
                )
            })
            .collect()
    }
}

impl Report {
    /// Side-by-side details for one pair
    pub fn details(
        &self,
        a: SubmissionId,
        b: SubmissionId,
        files: &[SourceFile],
    ) -> Option<ResultDetails> {
        ResultDetails::build(self, a, b, files)
    }
}

/// Text of `source` covered by `range` (0-based rows, character columns)
pub fn slice_range(source: &str, range: &SourceRange) -> String {
    let mut out = String::new();
    for (row, line) in source.split('\n').enumerate() {
        let row = row as u32;
        if row < range.start_row {
            continue;
        }
        if row > range.end_row {
            break;
        }
        let start = if row == range.start_row {
            range.start_col as usize
        } else {
            0
        };
        let chars = line.chars().skip(start);
        if row == range.end_row {
            out.extend(chars.take((range.end_col as usize).saturating_sub(start)));
        } else {
            out.extend(chars);
            out.push('\n');
        }
    }
    out
}
