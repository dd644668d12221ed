//! LCS-based line diff.
//!
//! * time: `O(N * M)` on the changed region, after common prefix/suffix
//!   trimming
//! * space: `O(N * M)`
//!
//! The table construction follows
//! <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/lcs.rs>.

use std::collections::BTreeMap;

use super::{DiffError, EditRecord};
use crate::utils::lines::{common_prefix_len, common_suffix_len, split_lines};

/// Largest `changed_lines * changed_lines` area for which the full LCS table
/// is built; larger inputs degrade to a single whole-range replacement.
const LCS_AREA_CUTOFF: usize = 1_000_000;

/// Line-level diff between `original` and `modified`.
///
/// Satisfies the [`DiffFn`](super::DiffFn) contract: ordered, maximal
/// contiguous change regions, with pure insertions encoded as
/// `original_end < original_start` and pure deletions as
/// `modified_end < modified_start`.
///
/// ```
/// use merge3_text::line_diff;
///
/// let records = line_diff("a\nb\nc", "a\nc")?; // line "b" deleted
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].original_start, 2);
/// assert_eq!(records[0].original_end, 2);
/// # Ok::<(), merge3_text::DiffError>(())
/// ```
///
/// # Errors
///
/// Never fails; the `Result` matches the [`DiffFn`](super::DiffFn) signature.
pub fn line_diff(original: &str, modified: &str) -> Result<Vec<EditRecord>, DiffError> {
    let old = split_lines(original);
    let new = split_lines(modified);

    let prefix = common_prefix_len(&old, &new);
    let suffix = common_suffix_len(&old[prefix..], &new[prefix..]);

    let old_changed = &old[prefix..old.len() - suffix];
    let new_changed = &new[prefix..new.len() - suffix];

    let ops = lcs_ops(old_changed, new_changed);
    Ok(records_from_ops(&ops, prefix))
}

/// What happened to one line of the changed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOp {
    Equal,
    Delete,
    Insert,
}

fn lcs_ops(old: &[&str], new: &[&str]) -> Vec<LineOp> {
    let mut ops = Vec::with_capacity(old.len() + new.len());

    let mut old_idx = 0;
    let mut new_idx = 0;

    if let Some(table) = make_table(old, new) {
        while old_idx < old.len() && new_idx < new.len() {
            if old[old_idx] == new[new_idx] {
                ops.push(LineOp::Equal);
                old_idx += 1;
                new_idx += 1;
            } else if table.get(&(new_idx, old_idx + 1)).unwrap_or(&0)
                >= table.get(&(new_idx + 1, old_idx)).unwrap_or(&0)
            {
                ops.push(LineOp::Delete);
                old_idx += 1;
            } else {
                ops.push(LineOp::Insert);
                new_idx += 1;
            }
        }
    }

    ops.extend(std::iter::repeat_n(LineOp::Delete, old.len() - old_idx));
    ops.extend(std::iter::repeat_n(LineOp::Insert, new.len() - new_idx));

    ops
}

/// `table[(i, j)]` is the length of the longest common subsequence of
/// `new[i..]` and `old[j..]`; zero entries are left out. `None` when the
/// changed region is too large to table.
fn make_table(old: &[&str], new: &[&str]) -> Option<BTreeMap<(usize, usize), u32>> {
    if old.len().saturating_mul(new.len()) > LCS_AREA_CUTOFF {
        return None;
    }

    let mut table = BTreeMap::new();

    for i in (0..new.len()).rev() {
        for j in (0..old.len()).rev() {
            let val = if new[i] == old[j] {
                table.get(&(i + 1, j + 1)).unwrap_or(&0) + 1
            } else {
                *table
                    .get(&(i + 1, j))
                    .unwrap_or(&0)
                    .max(table.get(&(i, j + 1)).unwrap_or(&0))
            };
            if val > 0 {
                table.insert((i, j), val);
            }
        }
    }

    Some(table)
}

/// Coalesce per-line operations into maximal contiguous change regions.
///
/// `consumed_prefix` is the number of identical leading lines trimmed before
/// the operations were computed; line numbers in the produced records are
/// absolute (1-based).
fn records_from_ops(ops: &[LineOp], consumed_prefix: usize) -> Vec<EditRecord> {
    let mut records = Vec::new();

    // Count of lines consumed so far on each side, doubling as the 1-based
    // number of the last consumed line.
    let mut original_line = i64::try_from(consumed_prefix).unwrap_or(i64::MAX);
    let mut modified_line = original_line;

    let mut pending_deletes: i64 = 0;
    let mut pending_inserts: i64 = 0;

    let flush = |records: &mut Vec<EditRecord>,
                     original_line: i64,
                     modified_line: i64,
                     deletes: i64,
                     inserts: i64| {
        if deletes > 0 && inserts > 0 {
            records.push(EditRecord::new(
                original_line - deletes + 1,
                original_line,
                modified_line - inserts + 1,
                modified_line,
            ));
        } else if deletes > 0 {
            records.push(EditRecord::new(
                original_line - deletes + 1,
                original_line,
                modified_line + 1,
                modified_line,
            ));
        } else if inserts > 0 {
            records.push(EditRecord::new(
                original_line,
                original_line - 1,
                modified_line - inserts + 1,
                modified_line,
            ));
        }
    };

    for op in ops {
        match op {
            LineOp::Equal => {
                flush(
                    &mut records,
                    original_line,
                    modified_line,
                    pending_deletes,
                    pending_inserts,
                );
                pending_deletes = 0;
                pending_inserts = 0;
                original_line += 1;
                modified_line += 1;
            }
            LineOp::Delete => {
                pending_deletes += 1;
                original_line += 1;
            }
            LineOp::Insert => {
                pending_inserts += 1;
                modified_line += 1;
            }
        }
    }

    flush(
        &mut records,
        original_line,
        modified_line,
        pending_deletes,
        pending_inserts,
    );

    records
}
