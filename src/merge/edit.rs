use crate::{diffs::EditRecord, utils::side::Side};

/// One canonicalized edit attributed to a side.
///
/// Ranges are 1-based and inclusive. A zero-length original range
/// (`oend == ostart - 1`) marks an insertion point before line `ostart`; a
/// zero-length modified range (`mend == mstart - 1`) marks a pure deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EditEntry {
    pub side: Side,
    pub ostart: i64,
    pub oend: i64,
    pub mstart: i64,
    pub mend: i64,
}

impl EditEntry {
    /// Canonicalize a raw diff record.
    ///
    /// A raw pure insertion (original end before start, the start naming the
    /// line the insertion follows) becomes a zero-length original range at
    /// the following line. A raw pure deletion gets a zero-length modified
    /// range at its reported position, the start left untouched.
    pub fn from_record(side: Side, record: EditRecord) -> Self {
        let (ostart, oend) = if record.original_end < record.original_start {
            (record.original_start + 1, record.original_start)
        } else {
            (record.original_start, record.original_end)
        };

        let mend = if record.modified_end < record.modified_start {
            record.modified_start - 1
        } else {
            record.modified_end
        };

        Self {
            side,
            ostart,
            oend,
            mstart: record.modified_start,
            mend,
        }
    }
}

/// Canonicalize a whole edit script, tagging every entry with `side`.
pub(crate) fn normalize_edits(side: Side, records: &[EditRecord]) -> Vec<EditEntry> {
    records
        .iter()
        .map(|record| EditEntry::from_record(side, *record))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case((2, 4, 2, 5), (2, 4, 2, 5); "replacement is untouched")]
    #[test_case((5, 4, 7, 9), (6, 5, 7, 9); "insertion shifts past the line it follows")]
    #[test_case((5, 2, 7, 9), (6, 5, 7, 9); "insertion end further below start")]
    #[test_case((0, -1, 1, 2), (1, 0, 1, 2); "insertion before the first line")]
    #[test_case((3, 4, 5, 0), (3, 4, 5, 4); "deletion keeps its modified start")]
    #[test_case((3, 4, 5, 4), (3, 4, 5, 4); "canonical deletion is untouched")]
    fn test_from_record(raw: (i64, i64, i64, i64), expected: (i64, i64, i64, i64)) {
        let entry = EditEntry::from_record(
            Side::Local,
            EditRecord::new(raw.0, raw.1, raw.2, raw.3),
        );
        assert_eq!(
            (entry.ostart, entry.oend, entry.mstart, entry.mend),
            expected
        );
    }

    #[test]
    fn test_normalize_keeps_order_and_tags_the_side() {
        let records = [EditRecord::new(1, 0, 1, 1), EditRecord::new(3, 3, 4, 4)];
        let entries = normalize_edits(Side::Remote, &records);

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.side == Side::Remote));
        assert_eq!((entries[0].ostart, entries[0].oend), (2, 1));
        assert_eq!((entries[1].ostart, entries[1].oend), (3, 3));
    }
}
