use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::labels::{expand_range, from_index, is_digits, sort_labels, to_index};
use crate::models::{Seat, SeatKey};

/// A named block of seats. Seats are addressed by their (row, seat) pair,
/// and a pair appears at most once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    name: String,
    pub is_general_admission: bool,
    /// Headcount for general-admission sections.
    pub capacity: Option<u32>,
    seats: HashMap<SeatKey, Seat>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn general_admission(name: impl Into<String>, capacity: Option<u32>) -> Self {
        Self {
            name: name.into(),
            is_general_admission: true,
            capacity,
            seats: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // Plan keeps section names unique, so renames go through it
    pub(crate) fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn contains(&self, row: &str, seat: &str) -> bool {
        self.seats.contains_key(&SeatKey::new(row, seat))
    }

    pub fn get(&self, row: &str, seat: &str) -> Option<&Seat> {
        self.seats.get(&SeatKey::new(row, seat))
    }

    pub fn keys(&self) -> impl Iterator<Item = &SeatKey> {
        self.seats.keys()
    }

    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.values()
    }

    /// All seats ordered naturally by row, then seat.
    pub fn sorted_seats(&self) -> Vec<&Seat> {
        let mut keys: Vec<&SeatKey> = self.seats.keys().collect();
        keys.sort_by(|a, b| a.natural_cmp(b));
        keys.into_iter().filter_map(|k| self.seats.get(k)).collect()
    }

    /// Distinct row labels in natural order.
    pub fn rows(&self) -> Vec<String> {
        let distinct: HashSet<&str> = self.seats.keys().map(|k| k.row.as_str()).collect();
        let mut rows: Vec<String> = distinct.into_iter().map(str::to_string).collect();
        sort_labels(&mut rows);
        rows
    }

    /// Seat labels of one row in natural order.
    pub fn seats_in_row(&self, row: &str) -> Vec<String> {
        let mut seats: Vec<String> = self
            .seats
            .keys()
            .filter(|k| k.row == row)
            .map(|k| k.seat.clone())
            .collect();
        sort_labels(&mut seats);
        seats
    }

    /// Insert a seat unless the pair is already present. Returns whether
    /// anything was added.
    pub fn add_seat(&mut self, row: &str, seat: &str) -> bool {
        let key = SeatKey::new(row, seat);
        if self.seats.contains_key(&key) {
            debug!(section = %self.name, %key, "seat already present");
            return false;
        }
        self.seats.insert(key, Seat::new(row, seat));
        true
    }

    pub fn add_seats<S: AsRef<str>>(&mut self, row: &str, seats: &[S]) -> usize {
        seats
            .iter()
            .filter(|seat| self.add_seat(row, seat.as_ref()))
            .count()
    }

    /// Add every seat between `start` and `end` to `row`.
    ///
    /// Tries the label range first and the plain integer range second. When
    /// neither applies nothing is added and 0 is returned.
    pub fn add_seat_range(&mut self, row: &str, start: &str, end: &str) -> usize {
        match expand_range(start, end) {
            Some(labels) => self.add_seats(row, &labels),
            None => {
                debug!(section = %self.name, row, start, end, "seat range ignored");
                0
            }
        }
    }

    pub fn delete_seat(&mut self, row: &str, seat: &str) -> bool {
        self.seats.remove(&SeatKey::new(row, seat)).is_some()
    }

    pub fn delete_seat_range(&mut self, row: &str, start: &str, end: &str) -> usize {
        let Some(labels) = expand_range(start, end) else {
            return 0;
        };
        labels
            .iter()
            .filter(|seat| self.delete_seat(row, seat))
            .count()
    }

    /// Remove every seat of `row`. Returns the number removed.
    pub fn delete_row(&mut self, row: &str) -> usize {
        let before = self.seats.len();
        self.seats.retain(|key, _| key.row != row);
        before - self.seats.len()
    }

    /// Re-key a single seat. A seat already sitting at the new pair is
    /// replaced.
    pub fn change_seat_number(&mut self, row: &str, old_seat: &str, new_seat: &str) -> bool {
        if old_seat == new_seat {
            return false;
        }
        let Some(mut seat) = self.seats.remove(&SeatKey::new(row, old_seat)) else {
            return false;
        };
        seat.number = new_seat.to_string();
        self.seats.insert(seat.key(), seat);
        true
    }

    /// Move every seat of `old_row` under `new_row`, keeping seat labels.
    pub fn rename_row(&mut self, old_row: &str, new_row: &str) -> usize {
        if old_row == new_row {
            return 0;
        }
        let moved = self.take_rows(|row| row == old_row);
        let count = moved.len();
        for mut seat in moved {
            seat.row = new_row.to_string();
            self.seats.insert(seat.key(), seat);
        }
        count
    }

    /// Give the listed rows consecutive new labels starting at
    /// `new_start_row`, in the same digit/letter mode as the start label,
    /// optionally prefixed with `#`.
    ///
    /// Returns the (old, new) pairs applied. Rows not listed keep their
    /// labels; a repeated old label keeps its first assignment. An
    /// unreadable start label, or one too close to the largest label to
    /// cover every row, changes nothing.
    pub fn renumber_rows<S: AsRef<str>>(
        &mut self,
        old_rows: &[S],
        new_start_row: &str,
        add_prefix: bool,
    ) -> Vec<(String, String)> {
        let Some(start) = to_index(new_start_row) else {
            debug!(section = %self.name, new_start_row, "renumber start is not a label");
            return Vec::new();
        };
        let is_digit = is_digits(new_start_row);

        let mut mapping: Vec<(String, String)> = Vec::new();
        let mut next = Some(start);
        for old in old_rows {
            let old = old.as_ref();
            if mapping.iter().any(|(o, _)| o == old) {
                continue;
            }
            let Some(index) = next else {
                debug!(section = %self.name, new_start_row, "renumbering runs past the last label");
                return Vec::new();
            };
            let mut label = from_index(index, is_digit);
            if add_prefix {
                label.insert(0, '#');
            }
            mapping.push((old.to_string(), label));
            next = index.checked_add(1);
        }

        let lookup: HashMap<&str, &str> = mapping
            .iter()
            .map(|(o, n)| (o.as_str(), n.as_str()))
            .collect();
        let moved = self.take_rows(|row| lookup.contains_key(row));
        for mut seat in moved {
            if let Some(new_row) = lookup.get(seat.row.as_str()) {
                seat.row = (*new_row).to_string();
            }
            self.seats.insert(seat.key(), seat);
        }
        mapping
    }

    /// Deep copy named `{name}_copy`.
    pub fn duplicate(&self) -> Section {
        let mut copy = self.clone();
        copy.name = format!("{}_copy", self.name);
        copy
    }

    pub(crate) fn insert_seat(&mut self, seat: Seat) {
        self.seats.insert(seat.key(), seat);
    }

    pub(crate) fn take_seat(&mut self, row: &str, seat: &str) -> Option<Seat> {
        self.seats.remove(&SeatKey::new(row, seat))
    }

    // Pull matching rows out first so re-keying never collides with itself
    fn take_rows(&mut self, mut matches: impl FnMut(&str) -> bool) -> Vec<Seat> {
        let keys: Vec<SeatKey> = self
            .seats
            .keys()
            .filter(|k| matches(&k.row))
            .cloned()
            .collect();
        keys.iter().filter_map(|k| self.seats.remove(k)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_with(rows: &[(&str, &[&str])]) -> Section {
        let mut section = Section::new("Main");
        for (row, seats) in rows {
            section.add_seats(row, seats);
        }
        section
    }

    #[test]
    fn add_seat_is_idempotent() {
        let mut section = Section::new("A");
        assert!(section.add_seat("1", "1"));
        assert!(!section.add_seat("1", "1"));
        assert_eq!(section.seat_count(), 1);
    }

    #[test]
    fn add_seat_range_letters_and_numbers() {
        let mut section = Section::new("A");
        assert_eq!(section.add_seat_range("1", "A", "C"), 3);
        assert_eq!(section.add_seat_range("2", "3", "1"), 3);
        assert_eq!(section.seats_in_row("1"), vec!["A", "B", "C"]);
        assert_eq!(section.seats_in_row("2"), vec!["1", "2", "3"]);
    }

    #[test]
    fn add_seat_range_falls_back_to_integers() {
        let mut section = Section::new("A");
        assert_eq!(section.add_seat_range("1", "-1", "1"), 3);
        assert!(section.contains("1", "-1"));
        assert!(section.contains("1", "0"));
    }

    #[test]
    fn add_seat_range_gives_up_silently() {
        let mut section = Section::new("A");
        assert_eq!(section.add_seat_range("1", "A1", "A3"), 0);
        assert_eq!(section.add_seat_range("1", "", "3"), 0);
        assert!(section.is_empty());
    }

    #[test]
    fn delete_seat_absent_is_noop() {
        let mut section = section_with(&[("1", &["1"])]);
        assert!(!section.delete_seat("1", "2"));
        assert!(section.delete_seat("1", "1"));
        assert!(section.is_empty());
    }

    #[test]
    fn delete_seat_range_removes_only_listed() {
        let mut section = Section::new("A");
        section.add_seat_range("1", "A", "C");
        assert_eq!(section.delete_seat_range("1", "A", "B"), 2);
        assert_eq!(section.seats_in_row("1"), vec!["C"]);
    }

    #[test]
    fn delete_row_matches_whole_label() {
        let mut section = section_with(&[("1", &["1", "2"]), ("10", &["1"]), ("1-1", &["1"])]);
        assert_eq!(section.delete_row("1"), 2);
        assert_eq!(section.rows(), vec!["10", "1-1"]);
    }

    #[test]
    fn change_seat_number_rekeys_one_seat() {
        let mut section = section_with(&[("1", &["A", "B"])]);
        assert!(section.change_seat_number("1", "A", "Z"));
        assert_eq!(section.seats_in_row("1"), vec!["B", "Z"]);
        let seat = section.get("1", "Z").unwrap();
        assert_eq!(seat.number, "Z");
        assert!(!section.change_seat_number("1", "Q", "R"));
    }

    #[test]
    fn change_seat_number_replaces_seat_at_target() {
        let mut section = section_with(&[("1", &["A", "B"])]);
        assert!(section.change_seat_number("1", "A", "B"));
        assert_eq!(section.seat_count(), 1);
        assert_eq!(section.seats_in_row("1"), vec!["B"]);
    }

    #[test]
    fn rename_row_keeps_seat_labels() {
        let mut section = section_with(&[("1", &["1", "2"]), ("2", &["1"])]);
        assert_eq!(section.rename_row("1", "A"), 2);
        assert_eq!(section.rows(), vec!["2", "A"]);
        assert_eq!(section.get("A", "2").unwrap().row, "A");
    }

    #[test]
    fn renumber_rows_letters_to_numbers() {
        let mut section = section_with(&[("A", &["1", "2"]), ("B", &["1"]), ("C", &["5"])]);
        let mapping = section.renumber_rows(&["A", "B"], "10", false);
        assert_eq!(
            mapping,
            vec![("A".to_string(), "10".to_string()), ("B".to_string(), "11".to_string())]
        );
        assert_eq!(section.rows(), vec!["10", "11", "C"]);
        assert_eq!(section.seats_in_row("10"), vec!["1", "2"]);
    }

    #[test]
    fn renumber_rows_shifting_onto_existing_labels() {
        let mut section = section_with(&[("1", &["1"]), ("2", &["1", "2"])]);
        section.renumber_rows(&["1", "2"], "2", false);
        assert_eq!(section.rows(), vec!["2", "3"]);
        assert_eq!(section.seats_in_row("2"), vec!["1"]);
        assert_eq!(section.seats_in_row("3"), vec!["1", "2"]);
    }

    #[test]
    fn renumber_rows_with_hash_prefix_and_letters() {
        let mut section = section_with(&[("1", &["1"]), ("2", &["1"])]);
        section.renumber_rows(&["2", "1"], "Z", true);
        assert_eq!(section.rows(), vec!["#AA", "#Z"]);
        assert!(section.contains("#Z", "1"));
        assert!(section.contains("#AA", "1"));
    }

    #[test]
    fn renumber_rows_bad_start_is_noop() {
        let mut section = section_with(&[("1", &["1"])]);
        assert!(section.renumber_rows(&["1"], "A1", false).is_empty());
        assert_eq!(section.rows(), vec!["1"]);
    }

    #[test]
    fn renumber_rows_repeated_label_keeps_first_assignment() {
        let mut section = section_with(&[("A", &["1"]), ("B", &["1"])]);
        let mapping = section.renumber_rows(&["A", "A", "B"], "1", false);
        assert_eq!(
            mapping,
            vec![("A".to_string(), "1".to_string()), ("B".to_string(), "2".to_string())]
        );
        assert_eq!(section.rows(), vec!["1", "2"]);
    }

    #[test]
    fn renumber_rows_past_largest_label_is_noop() {
        let mut section = section_with(&[("1", &["1"]), ("2", &["1"])]);
        assert!(section
            .renumber_rows(&["1", "2"], "18446744073709551615", false)
            .is_empty());
        assert_eq!(section.rows(), vec!["1", "2"]);

        let mapping = section.renumber_rows(&["2"], "18446744073709551615", false);
        assert_eq!(
            mapping,
            vec![("2".to_string(), "18446744073709551615".to_string())]
        );
        assert!(section.contains("18446744073709551615", "1"));
    }

    #[test]
    fn duplicate_is_independent() {
        let original = section_with(&[("1", &["1"])]);
        let mut copy = original.duplicate();
        assert_eq!(copy.name(), "Main_copy");
        copy.add_seat("1", "2");
        assert_eq!(original.seat_count(), 1);
        assert_eq!(copy.seat_count(), 2);
    }

    #[test]
    fn sorted_seats_follow_natural_order() {
        let section = section_with(&[("10", &["1"]), ("2", &["10", "9"])]);
        let order: Vec<(String, String)> = section
            .sorted_seats()
            .into_iter()
            .map(|s| (s.row.clone(), s.number.clone()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("2".to_string(), "9".to_string()),
                ("2".to_string(), "10".to_string()),
                ("10".to_string(), "1".to_string()),
            ]
        );
    }
}
