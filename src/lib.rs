mod diffs;
mod merge;
mod utils;

pub use diffs::{DiffError, DiffFn, EditRecord, line_diff};
#[cfg(feature = "futures")]
pub use merge::merge3_async;
pub use merge::{
    Chunk, ConflictMarkers, MergeError, MergedSpan, merge3, merge3_from_edits,
    merge3_with_history, merge3_with_markers,
};
pub use utils::side::Side;

#[cfg(feature = "wasm")]
pub mod wasm;
