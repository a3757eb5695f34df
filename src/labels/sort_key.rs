//! Natural ordering for row and seat labels.
//!
//! Sorts "1, 2, 10" instead of "1, 10, 2" and "A, B, Z, AA" instead of
//! "A, AA, B".

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;

use super::{is_letters, to_index};

// Whole label = optional non-digit prefix, one digit run, optional non-digit suffix
static NUMBERED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^0-9]*)([0-9]+)([^0-9]*)$").expect("Invalid numbered label regex")
});

static DIGIT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid digit run regex"));

/// Comparable key for a label. Variant order is the primary sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    /// Exactly one digit run, or a plain integer.
    Numbered {
        prefix: String,
        number: i128,
        suffix: String,
    },
    /// Several digit runs: ordered by the first one, then the raw label.
    Embedded { number: i128, label: String },
    /// Letters only, in spreadsheet-column order.
    Alphabetic { index: u64 },
    Other { label: String },
}

fn digit_run_value(digits: &str) -> i128 {
    digits.parse().unwrap_or(i128::MAX)
}

pub fn sort_key(label: &str) -> SortKey {
    if let Some(caps) = NUMBERED_RE.captures(label) {
        return SortKey::Numbered {
            prefix: caps[1].to_string(),
            number: digit_run_value(&caps[2]),
            suffix: caps[3].to_string(),
        };
    }

    if let Ok(number) = label.trim().parse::<i128>() {
        return SortKey::Numbered {
            prefix: String::new(),
            number,
            suffix: String::new(),
        };
    }

    if let Some(run) = DIGIT_RUN_RE.find(label) {
        return SortKey::Embedded {
            number: digit_run_value(run.as_str()),
            label: label.to_string(),
        };
    }

    if is_letters(label) {
        if let Some(index) = to_index(&label.to_ascii_uppercase()) {
            return SortKey::Alphabetic { index };
        }
    }

    SortKey::Other {
        label: label.to_string(),
    }
}

/// Natural comparison. Labels with equal keys ("a" and "A") fall back to
/// byte order so sorting is deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

pub fn sort_labels<S: AsRef<str>>(labels: &mut [S]) {
    labels.sort_by_cached_key(|label| {
        let label: &str = label.as_ref();
        (sort_key(label), label.to_string())
    });
}
