//! Bulk row construction: many rows, each with a seat run, in one request.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::error::{Result, SeatingError};
use crate::labels::{
    alphanum_range, alphanum_range_len, expand_range, expand_range_len, integer_range,
    integer_range_len,
};
use crate::models::Section;

/// Which seat numbers a bulk request keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Parity {
    #[default]
    All,
    Even,
    Odd,
}

impl Parity {
    /// Even/odd only apply to numeric labels; anything else is dropped.
    pub fn keeps(self, label: &str) -> bool {
        match self {
            Parity::All => true,
            Parity::Even => label.parse::<i64>().is_ok_and(|n| n.rem_euclid(2) == 0),
            Parity::Odd => label.parse::<i64>().is_ok_and(|n| n.rem_euclid(2) == 1),
        }
    }
}

impl FromStr for Parity {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Ok(Parity::All),
            "even" => Ok(Parity::Even),
            "odd" => Ok(Parity::Odd),
            other => Err(format!("unknown parity '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct RowRangeRequest {
    #[validate(length(min = 1))]
    pub start_row: String,
    #[validate(length(min = 1))]
    pub end_row: String,
    #[validate(length(min = 1))]
    pub start_seat: String,
    #[validate(length(min = 1))]
    pub end_seat: String,
    #[serde(default)]
    pub parity: Parity,
    /// Number seats across all rows instead of restarting per row.
    #[serde(default)]
    pub continuous: bool,
    #[serde(default)]
    pub row_prefix: String,
    #[serde(default)]
    pub row_suffix: String,
    /// Mark generated rows with a leading `#`.
    #[serde(default)]
    pub unnumbered_rows: bool,
}

/// Most seats one bulk request may generate, counted before parity filtering.
pub const MAX_GENERATED_SEATS: u128 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRow {
    pub label: String,
    pub seats: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowRangeOutcome {
    pub rows: Vec<String>,
    pub seats_added: usize,
}

/// Row labels between `start` and `end`.
///
/// Integers when both ends parse as integers, else a letter range, else the
/// single label when both ends are equal.
pub fn row_labels(start: &str, end: &str) -> Result<Vec<String>> {
    let invalid = || SeatingError::InvalidRowRange {
        start: start.to_string(),
        end: end.to_string(),
    };
    if start.parse::<i64>().is_ok() && end.parse::<i64>().is_ok() {
        return integer_range(start, end).ok_or_else(invalid);
    }
    let letters = alphanum_range(start, end);
    if !letters.is_empty() {
        return Ok(letters);
    }
    if start == end {
        return Ok(vec![start.to_string()]);
    }
    Err(invalid())
}

/// How many labels `row_labels` yields for the same ends.
fn row_count(start: &str, end: &str) -> Result<u128> {
    if start.parse::<i64>().is_ok() && end.parse::<i64>().is_ok() {
        if let Some(len) = integer_range_len(start, end) {
            return Ok(len);
        }
    }
    match alphanum_range_len(start, end) {
        0 if start == end => Ok(1),
        0 => Err(SeatingError::InvalidRowRange {
            start: start.to_string(),
            end: end.to_string(),
        }),
        len => Ok(len),
    }
}

fn check_size(rows: u128, per_row: u128) -> Result<()> {
    let requested = rows.saturating_mul(per_row);
    if requested > MAX_GENERATED_SEATS {
        return Err(SeatingError::TooManySeats {
            requested,
            limit: MAX_GENERATED_SEATS,
        });
    }
    Ok(())
}

fn decorate(request: &RowRangeRequest, row: &str) -> String {
    let label = format!("{}{}{}", request.row_prefix, row, request.row_suffix);
    if request.unnumbered_rows {
        format!("#{label}")
    } else {
        label
    }
}

/// Work out every row and seat a request would create, without touching a
/// section.
pub fn build_row_range(request: &RowRangeRequest) -> Result<Vec<GeneratedRow>> {
    request.validate()?;
    let start_row = request.start_row.trim();
    let end_row = request.end_row.trim();
    let start_seat = request.start_seat.trim();
    let end_seat = request.end_seat.trim();

    let row_count = row_count(start_row, end_row)?;
    let invalid_seats = || SeatingError::InvalidSeatRange {
        start: start_seat.to_string(),
        end: end_seat.to_string(),
    };

    if request.continuous {
        let non_numeric = || SeatingError::NonNumericContinuous {
            start: start_seat.to_string(),
            end: end_seat.to_string(),
        };
        let a: i64 = start_seat.parse().map_err(|_| non_numeric())?;
        let b: i64 = end_seat.parse().map_err(|_| non_numeric())?;
        let (lo, hi) = if a > b { (b, a) } else { (a, b) };
        let per_row = i128::from(hi) - i128::from(lo) + 1;
        check_size(row_count, per_row.unsigned_abs())?;
        let rows = row_labels(start_row, end_row)?;

        let mut next = i128::from(lo);
        let generated = rows
            .iter()
            .map(|row| {
                let seats = (next..next + per_row)
                    .map(|n| n.to_string())
                    .filter(|label| request.parity.keeps(label))
                    .collect();
                next += per_row;
                GeneratedRow {
                    label: decorate(request, row),
                    seats,
                }
            })
            .collect();
        return Ok(generated);
    }

    let per_row = expand_range_len(start_seat, end_seat).ok_or_else(invalid_seats)?;
    check_size(row_count, per_row)?;
    let rows = row_labels(start_row, end_row)?;
    let seats: Vec<String> = expand_range(start_seat, end_seat)
        .ok_or_else(invalid_seats)?
        .into_iter()
        .filter(|label| request.parity.keeps(label))
        .collect();

    Ok(rows
        .iter()
        .map(|row| GeneratedRow {
            label: decorate(request, row),
            seats: seats.clone(),
        })
        .collect())
}

impl Section {
    /// Apply a bulk row request. Seats that already exist are left alone.
    pub fn add_row_range(&mut self, request: &RowRangeRequest) -> Result<RowRangeOutcome> {
        let generated = build_row_range(request)?;
        let mut outcome = RowRangeOutcome::default();
        for row in generated {
            outcome.seats_added += self.add_seats(&row.label, &row.seats);
            outcome.rows.push(row.label);
        }
        info!(
            section = self.name(),
            rows = outcome.rows.len(),
            seats = outcome.seats_added,
            "row range added"
        );
        Ok(outcome)
    }
}
