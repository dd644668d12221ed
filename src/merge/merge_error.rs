use thiserror::Error;

use crate::diffs::DiffError;

/// Failure of a three-way merge. No partial output accompanies an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// One of the two diff invocations failed; the merge was not attempted.
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// An edit starts before the end of an earlier one from the same script,
    /// breaking the ordered, non-overlapping contract of the diff capability.
    #[error(
        "edit covering original lines {start}..={end} overlaps an earlier edit or is out of order"
    )]
    EditsOutOfOrder { start: i64, end: i64 },

    /// An edit references original lines the document does not have.
    #[error(
        "edit covering original lines {start}..={end} lies outside the original document of \
         {line_count} lines"
    )]
    EditsOutOfRange {
        start: i64,
        end: i64,
        line_count: i64,
    },
}
