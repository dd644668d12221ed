//! The line-level diff boundary of the merge pipeline.
//!
//! The merge itself is diff-agnostic: any capability satisfying the
//! [`DiffFn`] contract can drive it. [`line_diff`] is the built-in
//! implementation used by the wasm adapter and the demo binary.

mod line_diff;

pub use line_diff::line_diff;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A line-level diff capability.
///
/// Given an original and a modified text, the capability returns the list of
/// [`EditRecord`]s transforming the first into the second, or a [`DiffError`].
///
/// Contract relied upon by the merge:
/// - records are ordered by increasing `original_start`, ties broken by
///   increasing `original_end`;
/// - each record describes a maximal contiguous change region (neighbouring
///   records are separated by at least one unchanged line);
/// - a pure insertion is encoded with `original_end < original_start`, where
///   `original_start` names the line the insertion follows (0 places it
///   before the first line);
/// - a pure deletion carries `modified_end < modified_start`, where
///   `modified_start` is the 1-based position in the modified text at which
///   the removed lines would appear.
pub type DiffFn = dyn Fn(&str, &str) -> Result<Vec<EditRecord>, DiffError>;

/// One contiguous change region between an original and a modified text,
/// expressed as 1-based, inclusive line ranges on both sides.
///
/// See [`DiffFn`] for the encoding of pure insertions and deletions.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRecord {
    pub original_start: i64,
    pub original_end: i64,
    pub modified_start: i64,
    pub modified_end: i64,
}

impl EditRecord {
    #[must_use]
    pub const fn new(
        original_start: i64,
        original_end: i64,
        modified_start: i64,
        modified_end: i64,
    ) -> Self {
        Self {
            original_start,
            original_end,
            modified_start,
            modified_end,
        }
    }
}

/// Failure reported by a diff capability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("comparing the documents failed: {reason}")]
pub struct DiffError {
    /// Capability-specific description of what went wrong.
    pub reason: String,
}

impl DiffError {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
