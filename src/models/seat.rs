use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::labels::natural_cmp;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub row: String,
    pub number: String,
}

impl Seat {
    pub fn new(row: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            row: row.into(),
            number: number.into(),
        }
    }

    pub fn key(&self) -> SeatKey {
        SeatKey::new(self.row.clone(), self.number.clone())
    }
}

/// Structural (row, seat) address of a seat inside a section.
///
/// Labels may contain `-` freely; the pair is hashed as two strings, never
/// as a formatted "row-seat" string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatKey {
    pub row: String,
    pub seat: String,
}

impl SeatKey {
    pub fn new(row: impl Into<String>, seat: impl Into<String>) -> Self {
        Self {
            row: row.into(),
            seat: seat.into(),
        }
    }

    /// Row first, then seat, both in natural label order.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.row, &other.row).then_with(|| natural_cmp(&self.seat, &other.seat))
    }
}

// Display form only, used in messages and reports
impl fmt::Display for SeatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.seat)
    }
}
