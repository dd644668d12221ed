/// Split `text` into lines on `'\n'` exactly.
///
/// The empty string is a single empty line and a trailing newline yields a
/// trailing empty line, so joining the result with `'\n'` reproduces `text`
/// byte-for-byte.
#[must_use]
pub fn split_lines(text: &str) -> Vec<&str> { text.split('\n').collect() }

/// The number of lines as a line number.
#[must_use]
pub fn line_count(lines: &[&str]) -> i64 { i64::try_from(lines.len()).unwrap_or(i64::MAX) }

/// Slice `lines` between the 1-based, inclusive positions `start` and `end`.
///
/// Bounds outside the array are clamped to its extent; an end before the
/// start yields an empty slice.
#[must_use]
pub fn slice_lines<'a>(lines: &'a [&'a str], start: i64, end: i64) -> &'a [&'a str] {
    let low = start.max(1);
    let high = end.min(line_count(lines));

    if high < low {
        return &[];
    }

    let low = usize::try_from(low - 1).unwrap_or(usize::MAX);
    let high = usize::try_from(high).unwrap_or(usize::MAX);
    &lines[low..high]
}

/// Length of the longest common prefix of the two line arrays.
#[must_use]
pub fn common_prefix_len(old: &[&str], new: &[&str]) -> usize {
    old.iter().zip(new).take_while(|(a, b)| a == b).count()
}

/// Length of the longest common suffix of the two line arrays.
#[must_use]
pub fn common_suffix_len(old: &[&str], new: &[&str]) -> usize {
    old.iter()
        .rev()
        .zip(new.iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}
