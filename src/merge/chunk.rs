#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::utils::side::Side;

/// One segment of the merged document, attributing its lines to a source.
///
/// All ranges are 1-based and inclusive. Read left to right, the chunks of a
/// merge partition the original line range exactly once: `Original` chunks
/// cover the untouched lines, every other chunk stands for the original
/// region its edits replaced.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunk {
    /// Lines copied verbatim from the original document.
    Original { start: i64, end: i64 },

    /// Lines copied verbatim from one of the edited documents.
    Edited { side: Side, start: i64, end: i64 },

    /// An original region both sides touched in ways that cannot be told
    /// apart structurally; resolved by content comparison during assembly.
    Conflict {
        local_start: i64,
        local_end: i64,
        original_start: i64,
        original_end: i64,
        remote_start: i64,
        remote_end: i64,
    },
}
