use super::{chunk::Chunk, edit::EditEntry, merge_error::MergeError};
use crate::utils::side::Side;

/// Combine the canonicalized edit scripts of both sides into an ordered chunk
/// sequence that partitions the original line range `[1, olen]` exactly once.
///
/// `alen` and `blen` bound the envelopes of multi-edit groups; they play no
/// other role. Each script must be ordered by increasing original position
/// and stay within the original document, otherwise a structural error is
/// returned and no chunks are produced.
pub(crate) fn derive_chunks(
    olen: i64,
    alen: i64,
    blen: i64,
    local: Vec<EditEntry>,
    remote: Vec<EditEntry>,
) -> Result<Vec<Chunk>, MergeError> {
    validate_script(&local)?;
    validate_script(&remote)?;

    let edits = interleave(local, remote);

    let mut chunks = Vec::new();
    let mut next_original = 1;
    let mut index = 0;

    while index < edits.len() {
        // Extend the group over every edit whose original range starts within
        // the lines already claimed, transitively chaining overlaps. Two
        // insertion points at the same line also belong together, even though
        // a zero-length range claims no lines: both sides are describing the
        // same spot.
        let group_start = edits[index].ostart;
        let mut group_end = edits[index].oend;
        let mut after = index + 1;
        while after < edits.len() {
            let next = &edits[after];
            let same_insertion_point =
                group_end == group_start - 1 && next.ostart == group_start && next.oend == group_end;
            if next.ostart > group_end && !same_insertion_point {
                break;
            }
            group_end = group_end.max(next.oend);
            after += 1;
        }

        let group = &edits[index..after];

        if group_start < next_original {
            return Err(MergeError::EditsOutOfOrder {
                start: group_start,
                end: group_end,
            });
        }
        if group_start > olen + 1 || group_end > olen {
            return Err(MergeError::EditsOutOfRange {
                start: group_start,
                end: group_end,
                line_count: olen,
            });
        }

        if group_start > next_original {
            chunks.push(Chunk::Original {
                start: next_original,
                end: group_start - 1,
            });
        }

        resolve_group(group, group_start, group_end, alen, blen, &mut chunks);

        // A zero-length group (an insertion point) claims no original lines.
        next_original = group_end.max(group_start - 1) + 1;
        index = after;
    }

    if next_original <= olen {
        chunks.push(Chunk::Original {
            start: next_original,
            end: olen,
        });
    }

    Ok(chunks)
}

/// Reject a script whose entries are unordered or overlap each other; the
/// grouping below relies on each side being sorted and non-overlapping.
fn validate_script(edits: &[EditEntry]) -> Result<(), MergeError> {
    for pair in edits.windows(2) {
        let (previous, next) = (pair[0], pair[1]);
        if next.ostart < previous.ostart || next.ostart <= previous.oend {
            return Err(MergeError::EditsOutOfOrder {
                start: next.ostart,
                end: next.oend,
            });
        }
    }

    Ok(())
}

/// Merge the two per-side scripts into one list ordered by original position.
///
/// A remote edit goes first only when its original range is strictly earlier
/// (starts before, or starts at the same point and ends before); exact ties
/// go to local.
fn interleave(local: Vec<EditEntry>, remote: Vec<EditEntry>) -> Vec<EditEntry> {
    let mut merged = Vec::with_capacity(local.len() + remote.len());
    let mut local = local.into_iter().peekable();
    let mut remote = remote.into_iter().peekable();

    loop {
        let remote_first = match (local.peek(), remote.peek()) {
            (Some(l), Some(r)) => (r.ostart, r.oend) < (l.ostart, l.oend),
            (None, Some(_)) => true,
            (Some(_), None) => false,
            (None, None) => break,
        };

        if remote_first {
            merged.extend(remote.next());
        } else {
            merged.extend(local.next());
        }
    }

    merged
}

fn resolve_group(
    group: &[EditEntry],
    group_start: i64,
    group_end: i64,
    alen: i64,
    blen: i64,
    chunks: &mut Vec<Chunk>,
) {
    if let [only] = group {
        // A lone edit replaces its original range outright; a pure deletion
        // leaves nothing to show.
        if only.mend >= only.mstart {
            chunks.push(Chunk::Edited {
                side: only.side,
                start: only.mstart,
                end: only.mend,
            });
        }
        return;
    }

    let local = adjusted_envelope(group, Side::Local, group_start, group_end, alen);
    let remote = adjusted_envelope(group, Side::Remote, group_start, group_end, blen);

    match (local, remote) {
        (None, Some((start, end))) => chunks.push(Chunk::Edited {
            side: Side::Remote,
            start,
            end,
        }),
        (Some((start, end)), None) => chunks.push(Chunk::Edited {
            side: Side::Local,
            start,
            end,
        }),
        // Both sides deleted the region.
        (None, None) => {}
        (Some((local_start, local_end)), Some((remote_start, remote_end))) => {
            chunks.push(Chunk::Conflict {
                local_start,
                local_end,
                original_start: group_start,
                original_end: group_end,
                remote_start,
                remote_end,
            });
        }
    }
}

/// The side's minimal modified range covering the whole group: the envelope
/// of its own edits, widened by the group lines it left untouched and clamped
/// to the document. `None` when the side keeps no lines here (it deleted the
/// region, or has no edits in the group at all).
fn adjusted_envelope(
    group: &[EditEntry],
    side: Side,
    group_start: i64,
    group_end: i64,
    line_count: i64,
) -> Option<(i64, i64)> {
    let mut envelope: Option<(i64, i64, i64, i64)> = None;

    for edit in group.iter().filter(|edit| edit.side == side) {
        envelope = Some(envelope.map_or(
            (edit.ostart, edit.oend, edit.mstart, edit.mend),
            |(ostart, oend, mstart, mend)| {
                (
                    ostart.min(edit.ostart),
                    oend.max(edit.oend),
                    mstart.min(edit.mstart),
                    mend.max(edit.mend),
                )
            },
        ));
    }

    let (ostart, oend, mstart, mend) = envelope?;

    let start = (mstart - (ostart - group_start)).max(1);
    let end = (mend + (group_end - oend)).min(line_count);

    (end >= start).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn local(original: (i64, i64), modified: (i64, i64)) -> EditEntry {
        entry(Side::Local, original, modified)
    }

    fn remote(original: (i64, i64), modified: (i64, i64)) -> EditEntry {
        entry(Side::Remote, original, modified)
    }

    fn entry(side: Side, original: (i64, i64), modified: (i64, i64)) -> EditEntry {
        EditEntry {
            side,
            ostart: original.0,
            oend: original.1,
            mstart: modified.0,
            mend: modified.1,
        }
    }

    #[test]
    fn test_no_edits_is_one_original_chunk() {
        let chunks = derive_chunks(3, 3, 3, vec![], vec![]).unwrap();
        assert_eq!(chunks, vec![Chunk::Original { start: 1, end: 3 }]);
    }

    #[test]
    fn test_single_replacement_is_padded_with_original_chunks() {
        let chunks = derive_chunks(3, 3, 3, vec![local((2, 2), (2, 2))], vec![]).unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Original { start: 1, end: 1 },
                Chunk::Edited {
                    side: Side::Local,
                    start: 2,
                    end: 2
                },
                Chunk::Original { start: 3, end: 3 },
            ]
        );
    }

    #[test]
    fn test_edit_at_the_document_start_needs_no_gap() {
        let chunks = derive_chunks(3, 3, 3, vec![], vec![remote((1, 1), (1, 1))]).unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Edited {
                    side: Side::Remote,
                    start: 1,
                    end: 1
                },
                Chunk::Original { start: 2, end: 3 },
            ]
        );
    }

    #[test]
    fn test_pure_deletion_emits_nothing() {
        let chunks = derive_chunks(3, 2, 3, vec![local((2, 2), (2, 1))], vec![]).unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Original { start: 1, end: 1 },
                Chunk::Original { start: 3, end: 3 },
            ]
        );
    }

    #[test]
    fn test_insertion_after_the_last_line() {
        let chunks = derive_chunks(2, 3, 2, vec![local((3, 2), (3, 3))], vec![]).unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Original { start: 1, end: 2 },
                Chunk::Edited {
                    side: Side::Local,
                    start: 3,
                    end: 3
                },
            ]
        );
    }

    #[test]
    fn test_overlapping_different_edits_become_a_conflict() {
        let chunks = derive_chunks(
            3,
            3,
            3,
            vec![local((2, 2), (2, 2))],
            vec![remote((2, 2), (2, 2))],
        )
        .unwrap();

        insta::assert_debug_snapshot!(chunks, @r"
        [
            Original {
                start: 1,
                end: 1,
            },
            Conflict {
                local_start: 2,
                local_end: 2,
                original_start: 2,
                original_end: 2,
                remote_start: 2,
                remote_end: 2,
            },
            Original {
                start: 3,
                end: 3,
            },
        ]
        ");
    }

    #[test]
    fn test_both_sides_deleting_the_region_emits_nothing() {
        let chunks = derive_chunks(
            3,
            2,
            2,
            vec![local((2, 2), (2, 1))],
            vec![remote((2, 2), (2, 1))],
        )
        .unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Original { start: 1, end: 1 },
                Chunk::Original { start: 3, end: 3 },
            ]
        );
    }

    #[test]
    fn test_deletion_against_modification_takes_the_modification() {
        let chunks = derive_chunks(
            3,
            2,
            3,
            vec![local((2, 2), (2, 1))],
            vec![remote((2, 2), (2, 2))],
        )
        .unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Original { start: 1, end: 1 },
                Chunk::Edited {
                    side: Side::Remote,
                    start: 2,
                    end: 2
                },
                Chunk::Original { start: 3, end: 3 },
            ]
        );
    }

    #[test]
    fn test_chained_overlaps_merge_into_one_conflict_group() {
        // Local rewrites lines 1-2 into one line, remote rewrites lines 2-3;
        // the chain forms a single group covering lines 1-3.
        let chunks = derive_chunks(
            4,
            3,
            4,
            vec![local((1, 2), (1, 1))],
            vec![remote((2, 3), (2, 3))],
        )
        .unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Conflict {
                    local_start: 1,
                    local_end: 2,
                    original_start: 1,
                    original_end: 3,
                    remote_start: 1,
                    remote_end: 3,
                },
                Chunk::Original { start: 4, end: 4 },
            ]
        );
    }

    #[test]
    fn test_insertion_inside_the_other_sides_replacement_conflicts() {
        let chunks = derive_chunks(
            5,
            6,
            5,
            vec![local((3, 2), (3, 3))],
            vec![remote((2, 4), (2, 4))],
        )
        .unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Original { start: 1, end: 1 },
                Chunk::Conflict {
                    local_start: 2,
                    local_end: 5,
                    original_start: 2,
                    original_end: 4,
                    remote_start: 2,
                    remote_end: 4,
                },
                Chunk::Original { start: 5, end: 5 },
            ]
        );
    }

    #[test]
    fn test_envelope_is_clamped_to_the_document() {
        let chunks = derive_chunks(
            3,
            3,
            3,
            vec![local((1, 2), (1, 4))],
            vec![remote((2, 3), (2, 2))],
        )
        .unwrap();
        assert_eq!(
            chunks,
            vec![Chunk::Conflict {
                local_start: 1,
                local_end: 3,
                original_start: 1,
                original_end: 3,
                remote_start: 1,
                remote_end: 2,
            }]
        );
    }

    #[test]
    fn test_same_point_insertions_pair_into_one_group() {
        // Whether the texts agree is only known to the assembly step, so the
        // pair always surfaces as a conflict chunk over a zero-length
        // original range.
        let chunks = derive_chunks(
            3,
            4,
            4,
            vec![local((2, 1), (2, 2))],
            vec![remote((2, 1), (2, 2))],
        )
        .unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Original { start: 1, end: 1 },
                Chunk::Conflict {
                    local_start: 2,
                    local_end: 2,
                    original_start: 2,
                    original_end: 1,
                    remote_start: 2,
                    remote_end: 2,
                },
                Chunk::Original { start: 2, end: 3 },
            ]
        );
    }

    // An insertion point beside a same-position deletion on the other side is
    // deliberately pinned: the ranges have different original ends, so neither
    // direction groups them and both effects are applied.

    #[test]
    fn test_insertion_beside_a_remote_deletion_keeps_both_effects() {
        let chunks = derive_chunks(
            3,
            4,
            2,
            vec![local((2, 1), (2, 2))],
            vec![remote((2, 2), (2, 1))],
        )
        .unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Original { start: 1, end: 1 },
                Chunk::Edited {
                    side: Side::Local,
                    start: 2,
                    end: 2
                },
                Chunk::Original { start: 3, end: 3 },
            ]
        );
    }

    #[test]
    fn test_insertion_beside_a_local_deletion_keeps_both_effects() {
        let chunks = derive_chunks(
            3,
            2,
            4,
            vec![local((2, 2), (2, 1))],
            vec![remote((2, 1), (2, 2))],
        )
        .unwrap();
        assert_eq!(
            chunks,
            vec![
                Chunk::Original { start: 1, end: 1 },
                Chunk::Edited {
                    side: Side::Remote,
                    start: 2,
                    end: 2
                },
                Chunk::Original { start: 3, end: 3 },
            ]
        );
    }

    #[test]
    fn test_out_of_order_edits_are_rejected() {
        let result = derive_chunks(
            6,
            6,
            6,
            vec![local((3, 4), (3, 4)), local((2, 2), (6, 6))],
            vec![],
        );
        assert_eq!(
            result,
            Err(MergeError::EditsOutOfOrder { start: 2, end: 2 })
        );
    }

    #[test]
    fn test_edits_before_the_first_line_are_rejected() {
        // Normalized from a nonsensical raw record around line 0.
        let result = derive_chunks(3, 3, 3, vec![local((-1, -2), (1, 1))], vec![]);
        assert_eq!(
            result,
            Err(MergeError::EditsOutOfOrder { start: -1, end: -2 })
        );
    }

    #[test]
    fn test_edits_past_the_document_are_rejected() {
        let result = derive_chunks(3, 6, 3, vec![local((2, 5), (2, 5))], vec![]);
        assert_eq!(
            result,
            Err(MergeError::EditsOutOfRange {
                start: 2,
                end: 5,
                line_count: 3
            })
        );

        let result = derive_chunks(3, 6, 3, vec![local((6, 5), (4, 5))], vec![]);
        assert_eq!(
            result,
            Err(MergeError::EditsOutOfRange {
                start: 6,
                end: 5,
                line_count: 3
            })
        );
    }

    #[test]
    fn test_original_chunks_tile_the_untouched_lines() {
        let chunks = derive_chunks(
            10,
            10,
            10,
            vec![local((2, 3), (2, 3)), local((8, 8), (8, 8))],
            vec![remote((5, 5), (5, 5))],
        )
        .unwrap();

        let originals: Vec<(i64, i64)> = chunks
            .iter()
            .filter_map(|chunk| match chunk {
                Chunk::Original { start, end } => Some((*start, *end)),
                Chunk::Edited { .. } | Chunk::Conflict { .. } => None,
            })
            .collect();
        assert_eq!(originals, vec![(1, 1), (4, 4), (6, 7), (9, 10)]);
    }
}
