#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::chunk::Chunk;
use crate::utils::{lines::slice_lines, side::Side};

/// Sentinel strings wrapped around the two sides of an unresolved conflict.
///
/// The defaults match the save-file convention of the surrounding product.
/// A marker that is `None` or empty is left out of the output.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictMarkers {
    /// Opens the conflict block, before the local side's text.
    pub start: Option<String>,
    /// Separates the local side's text from the remote side's.
    pub mid: Option<String>,
    /// Closes the conflict block.
    pub end: Option<String>,
}

impl Default for ConflictMarkers {
    fn default() -> Self {
        Self {
            start: Some("<!-- begin merge -->\n~ Begin Remote".to_owned()),
            mid: Some("~ End Remote".to_owned()),
            end: Some("<!-- end merge -->".to_owned()),
        }
    }
}

impl ConflictMarkers {
    /// Suppress all sentinels; conflicting texts follow each other bare.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            start: None,
            mid: None,
            end: None,
        }
    }
}

fn marker(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

/// One segment of the merged document together with where it came from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergedSpan {
    /// Lines untouched by both sides.
    Unchanged(String),
    /// Lines as the local document has them.
    FromLocal(String),
    /// Lines as the remote document has them.
    FromRemote(String),
    /// Both sides changed the same region to different text.
    Conflict { local: String, remote: String },
}

/// Map every chunk to its text, resolving conflicts by content comparison.
///
/// A conflict whose sides turn out to agree with each other, or where only
/// one side actually changed the text, collapses into a plain span; when both
/// sides made the identical change, local is named as the source.
pub(crate) fn spans(
    chunks: &[Chunk],
    original: &[&str],
    local: &[&str],
    remote: &[&str],
) -> Vec<MergedSpan> {
    chunks
        .iter()
        .map(|chunk| match *chunk {
            Chunk::Original { start, end } => {
                MergedSpan::Unchanged(slice_lines(original, start, end).join("\n"))
            }
            Chunk::Edited {
                side: Side::Local,
                start,
                end,
            } => MergedSpan::FromLocal(slice_lines(local, start, end).join("\n")),
            Chunk::Edited {
                side: Side::Remote,
                start,
                end,
            } => MergedSpan::FromRemote(slice_lines(remote, start, end).join("\n")),
            Chunk::Conflict {
                local_start,
                local_end,
                original_start,
                original_end,
                remote_start,
                remote_end,
            } => {
                let original_lines = slice_lines(original, original_start, original_end);
                let local_lines = slice_lines(local, local_start, local_end);
                let remote_lines = slice_lines(remote, remote_start, remote_end);

                if original_lines == remote_lines {
                    MergedSpan::FromLocal(local_lines.join("\n"))
                } else if original_lines == local_lines {
                    MergedSpan::FromRemote(remote_lines.join("\n"))
                } else if local_lines == remote_lines {
                    MergedSpan::FromLocal(local_lines.join("\n"))
                } else {
                    MergedSpan::Conflict {
                        local: local_lines.join("\n"),
                        remote: remote_lines.join("\n"),
                    }
                }
            }
        })
        .collect()
}

/// Join the spans into the final document, wrapping unresolved conflicts in
/// the given markers.
pub(crate) fn render(spans: &[MergedSpan], markers: &ConflictMarkers) -> String {
    let mut fragments: Vec<&str> = Vec::with_capacity(spans.len());

    for span in spans {
        match span {
            MergedSpan::Unchanged(text)
            | MergedSpan::FromLocal(text)
            | MergedSpan::FromRemote(text) => fragments.push(text),
            MergedSpan::Conflict { local, remote } => {
                fragments.extend(marker(&markers.start));
                fragments.push(local);
                fragments.extend(marker(&markers.mid));
                fragments.push(remote);
                fragments.extend(marker(&markers.end));
            }
        }
    }

    fragments.join("\n")
}
