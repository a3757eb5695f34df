//! Row and seat label engine.
//!
//! Labels are either decimal digit strings ("1", "12") or spreadsheet-style
//! letter strings ("A", "Z", "AA"). Both map onto a 1-based ordinal so ranges
//! can be walked and regenerated in the same mode.

pub mod range;
pub mod sort_key;

pub use range::{
    alphanum_range, alphanum_range_len, expand_range, expand_range_len, integer_range,
    integer_range_len,
};
pub use sort_key::{natural_cmp, sort_key, sort_labels, SortKey};

/// True when `label` is a non-empty run of ASCII digits.
pub fn is_digits(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit())
}

/// True when `label` is a non-empty run of ASCII letters.
pub fn is_letters(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Convert a label to its ordinal.
///
/// Digit strings keep their numeric value ("07" -> 7, "0" -> 0). Letter
/// strings are read as bijective base-26 with A=1..Z=26, case-insensitive,
/// so "Z" -> 26 and "AA" -> 27. Returns `None` for empty or mixed labels
/// and on overflow.
pub fn to_index(label: &str) -> Option<u64> {
    if is_digits(label) {
        return label.parse().ok();
    }
    if !is_letters(label) {
        return None;
    }
    label.bytes().try_fold(0u64, |acc, b| {
        let digit = u64::from(b.to_ascii_uppercase() - b'A') + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

/// Regenerate a label from an ordinal.
///
/// With `is_digit` the decimal form is returned. Otherwise the bijective
/// base-26 form in upper case; index 0 has no letter form and yields "".
pub fn from_index(index: u64, is_digit: bool) -> String {
    if is_digit {
        return index.to_string();
    }
    let mut letters = Vec::new();
    let mut n = index;
    while n > 0 {
        let rem = (n - 1) % 26;
        // rem < 26
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_keep_their_value() {
        assert_eq!(to_index("0"), Some(0));
        assert_eq!(to_index("12"), Some(12));
        assert_eq!(to_index("007"), Some(7));
    }

    #[test]
    fn letters_count_like_spreadsheet_columns() {
        assert_eq!(to_index("A"), Some(1));
        assert_eq!(to_index("z"), Some(26));
        assert_eq!(to_index("AA"), Some(27));
        assert_eq!(to_index("AZ"), Some(52));
        assert_eq!(to_index("BA"), Some(53));
        assert_eq!(to_index("ZZ"), Some(702));
        assert_eq!(to_index("AAA"), Some(703));
    }

    #[test]
    fn rejects_empty_and_mixed_labels() {
        assert_eq!(to_index(""), None);
        assert_eq!(to_index("A1"), None);
        assert_eq!(to_index("1-2"), None);
        assert_eq!(to_index("Ä"), None);
    }

    #[test]
    fn overflow_is_rejected() {
        assert_eq!(to_index("99999999999999999999999"), None);
        assert_eq!(to_index(&"Z".repeat(20)), None);
    }

    #[test]
    fn from_index_inverts_letters() {
        assert_eq!(from_index(1, false), "A");
        assert_eq!(from_index(26, false), "Z");
        assert_eq!(from_index(27, false), "AA");
        assert_eq!(from_index(702, false), "ZZ");
        assert_eq!(from_index(703, false), "AAA");
        assert_eq!(from_index(0, false), "");
    }

    #[test]
    fn from_index_digit_mode() {
        assert_eq!(from_index(0, true), "0");
        assert_eq!(from_index(42, true), "42");
    }

    #[test]
    fn lowercase_round_trips_to_uppercase() {
        let idx = to_index("ab").unwrap();
        assert_eq!(from_index(idx, false), "AB");
    }
}
