mod assemble;
mod chunk;
mod chunk_merge;
mod edit;
mod merge_error;

pub use assemble::{ConflictMarkers, MergedSpan};
pub use chunk::Chunk;
pub use merge_error::MergeError;

#[cfg(feature = "futures")]
use std::future::Future;

#[cfg(feature = "futures")]
use crate::diffs::DiffError;
use crate::{
    diffs::{DiffFn, EditRecord},
    utils::{
        lines::{line_count, split_lines},
        side::Side,
    },
};

/// Merge two independently edited versions of `original` into one document.
///
/// Edits that touch different parts of the original are combined; regions
/// both sides changed to the same text are taken once; genuinely disagreeing
/// regions are kept as both alternatives, wrapped in the default
/// [`ConflictMarkers`].
///
/// The diff capability is invoked once per side; see
/// [`DiffFn`](crate::DiffFn) for the contract it must satisfy. The built-in
/// [`line_diff`](crate::line_diff) satisfies it.
///
/// ```
/// use merge3_text::{line_diff, merge3};
///
/// let original = "roses are red\nviolets are blue";
/// let local = "roses are crimson\nviolets are blue";
/// let remote = "roses are red\nviolets are indigo";
///
/// let merged = merge3(&line_diff, original, local, remote)?;
/// assert_eq!(merged, "roses are crimson\nviolets are indigo");
/// # Ok::<(), merge3_text::MergeError>(())
/// ```
///
/// # Errors
///
/// Returns [`MergeError::Diff`] when either diff invocation fails, and a
/// structural [`MergeError`] when an edit script violates the [`DiffFn`]
/// contract; no partial output is produced.
pub fn merge3(
    diff: &DiffFn,
    original: &str,
    local: &str,
    remote: &str,
) -> Result<String, MergeError> {
    merge3_with_markers(diff, &ConflictMarkers::default(), original, local, remote)
}

/// [`merge3`] with caller-chosen conflict markers.
///
/// ```
/// use merge3_text::{ConflictMarkers, line_diff, merge3_with_markers};
///
/// let merged = merge3_with_markers(&line_diff, &ConflictMarkers::none(), "a", "b", "c")?;
/// assert_eq!(merged, "b\nc");
/// # Ok::<(), merge3_text::MergeError>(())
/// ```
///
/// # Errors
///
/// Same as [`merge3`].
pub fn merge3_with_markers(
    diff: &DiffFn,
    markers: &ConflictMarkers,
    original: &str,
    local: &str,
    remote: &str,
) -> Result<String, MergeError> {
    let local_edits = diff(original, local)?;
    let remote_edits = diff(original, remote)?;

    merge3_from_edits(&local_edits, &remote_edits, markers, original, local, remote)
}

/// Merge and report where every merged segment came from, instead of
/// flattening the result into a single string.
///
/// Unresolved conflicts carry both alternatives; rendering and marker choice
/// are left to the caller.
///
/// ```
/// use merge3_text::{MergedSpan, line_diff, merge3_with_history};
///
/// let spans = merge3_with_history(&line_diff, "a\nb\nc", "a\nX\nc", "a\nY\nc")?;
/// assert_eq!(
///     spans,
///     vec![
///         MergedSpan::Unchanged("a".to_owned()),
///         MergedSpan::Conflict {
///             local: "X".to_owned(),
///             remote: "Y".to_owned(),
///         },
///         MergedSpan::Unchanged("c".to_owned()),
///     ]
/// );
/// # Ok::<(), merge3_text::MergeError>(())
/// ```
///
/// # Errors
///
/// Same as [`merge3`].
pub fn merge3_with_history(
    diff: &DiffFn,
    original: &str,
    local: &str,
    remote: &str,
) -> Result<Vec<MergedSpan>, MergeError> {
    let local_edits = diff(original, local)?;
    let remote_edits = diff(original, remote)?;

    spans_from_edits(&local_edits, &remote_edits, original, local, remote)
}

/// The synchronous core: merge from two already-computed edit scripts.
///
/// The wrappers above (and the `futures`/`wasm` adapters) only add the diff
/// invocations; everything observable about a merge can be exercised through
/// this function alone.
///
/// # Errors
///
/// Returns a structural [`MergeError`] when an edit script is out of order or
/// references lines the original document does not have.
pub fn merge3_from_edits(
    local_edits: &[EditRecord],
    remote_edits: &[EditRecord],
    markers: &ConflictMarkers,
    original: &str,
    local: &str,
    remote: &str,
) -> Result<String, MergeError> {
    let spans = spans_from_edits(local_edits, remote_edits, original, local, remote)?;
    Ok(assemble::render(&spans, markers))
}

/// [`merge3_with_markers`] over an asynchronous diff capability; the two
/// invocations run concurrently.
///
/// # Errors
///
/// Same as [`merge3`].
#[cfg(feature = "futures")]
pub async fn merge3_async<F, Fut>(
    diff: F,
    markers: &ConflictMarkers,
    original: &str,
    local: &str,
    remote: &str,
) -> Result<String, MergeError>
where
    F: Fn(&str, &str) -> Fut,
    Fut: Future<Output = Result<Vec<EditRecord>, DiffError>>,
{
    let (local_edits, remote_edits) =
        futures::future::try_join(diff(original, local), diff(original, remote)).await?;

    merge3_from_edits(&local_edits, &remote_edits, markers, original, local, remote)
}

fn spans_from_edits(
    local_edits: &[EditRecord],
    remote_edits: &[EditRecord],
    original: &str,
    local: &str,
    remote: &str,
) -> Result<Vec<MergedSpan>, MergeError> {
    let original_lines = split_lines(original);
    let local_lines = split_lines(local);
    let remote_lines = split_lines(remote);

    let chunks = chunk_merge::derive_chunks(
        line_count(&original_lines),
        line_count(&local_lines),
        line_count(&remote_lines),
        edit::normalize_edits(Side::Local, local_edits),
        edit::normalize_edits(Side::Remote, remote_edits),
    )?;

    Ok(assemble::spans(
        &chunks,
        &original_lines,
        &local_lines,
        &remote_lines,
    ))
}
