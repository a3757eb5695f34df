//! Inclusive label ranges.

use tracing::debug;

use super::{from_index, is_digits, to_index};

/// Ordered inclusive labels between `start` and `end`.
///
/// Numeric only when both ends are digit strings, otherwise both ends go
/// through the letter codec. Reversed ends are swapped. Empty or unparseable
/// input gives an empty list; callers decide on a fallback.
pub fn alphanum_range(start: &str, end: &str) -> Vec<String> {
    let Some((lo, hi)) = label_bounds(start, end) else {
        return Vec::new();
    };
    let is_digit = is_digits(start) && is_digits(end);
    (lo..=hi).map(|i| from_index(i, is_digit)).collect()
}

fn label_bounds(start: &str, end: &str) -> Option<(u64, u64)> {
    if start.is_empty() || end.is_empty() {
        return None;
    }
    let a = to_index(start)?;
    let b = to_index(end)?;
    Some(if a > b { (b, a) } else { (a, b) })
}

fn integer_bounds(start: &str, end: &str) -> Option<(i64, i64)> {
    let a: i64 = start.trim().parse().ok()?;
    let b: i64 = end.trim().parse().ok()?;
    Some(if a > b { (b, a) } else { (a, b) })
}

/// Plain integer interpretation of a range: both ends trimmed and parsed as
/// signed integers, swapped if reversed.
pub fn integer_range(start: &str, end: &str) -> Option<Vec<String>> {
    let (lo, hi) = integer_bounds(start, end)?;
    Some((lo..=hi).map(|n| n.to_string()).collect())
}

/// Number of labels `alphanum_range` would produce, without building them.
pub fn alphanum_range_len(start: &str, end: &str) -> u128 {
    label_bounds(start, end).map_or(0, |(lo, hi)| u128::from(hi - lo) + 1)
}

/// Number of labels `integer_range` would produce.
pub fn integer_range_len(start: &str, end: &str) -> Option<u128> {
    let (lo, hi) = integer_bounds(start, end)?;
    Some(u128::from(hi.abs_diff(lo)) + 1)
}

/// Number of labels `expand_range` would produce.
pub fn expand_range_len(start: &str, end: &str) -> Option<u128> {
    match alphanum_range_len(start, end) {
        0 => integer_range_len(start, end),
        len => Some(len),
    }
}

/// Two-stage expansion: the structured label range first, then the integer
/// range. `None` means neither interpretation produced labels.
pub fn expand_range(start: &str, end: &str) -> Option<Vec<String>> {
    let labels = alphanum_range(start, end);
    if !labels.is_empty() {
        return Some(labels);
    }
    let fallback = integer_range(start, end);
    if fallback.is_none() {
        debug!(start, end, "no range interpretation matched");
    }
    fallback
}
