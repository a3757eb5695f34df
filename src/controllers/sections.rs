use crate::controllers::{edit, AddRowsArgs};
use crate::error::{Result, SeatingError};
use crate::labels::expand_range_len;
use crate::models::{SeatingPlan, Section};
use crate::services::{RowRangeRequest, MAX_GENERATED_SEATS};
use crate::AppState;

fn section_mut<'a>(plan: &'a mut SeatingPlan, name: &str) -> Result<&'a mut Section> {
    plan.section_mut(name)
        .ok_or_else(|| SeatingError::SectionNotFound(name.to_string()))
}

pub fn add_section(
    state: &AppState,
    project: &str,
    name: &str,
    ga: bool,
    capacity: Option<u32>,
) -> Result<String> {
    edit(state, project, |plan| {
        let section = plan.create_section(name, ga)?;
        section.capacity = capacity;
        Ok(format!("Section '{name}' created"))
    })
}

pub fn delete_section(state: &AppState, project: &str, name: &str) -> Result<String> {
    edit(state, project, |plan| {
        Ok(if plan.delete_section(name) {
            format!("Section '{name}' deleted")
        } else {
            format!("Section '{name}' not present, nothing to delete")
        })
    })
}

pub fn rename_section(state: &AppState, project: &str, old: &str, new: &str) -> Result<String> {
    edit(state, project, |plan| {
        plan.try_rename_section(old, new)?;
        Ok(format!("Section '{old}' renamed to '{new}'"))
    })
}

pub fn clone_section(state: &AppState, project: &str, name: &str, count: usize) -> Result<String> {
    edit(state, project, |plan| {
        if !plan.contains_section(name) {
            return Err(SeatingError::SectionNotFound(name.to_string()));
        }
        let created = plan.clone_section_many(name, count);
        Ok(format!("Created: {}", created.join(", ")))
    })
}

pub fn merge(state: &AppState, project: &str, sources: &[String], into: &str) -> Result<String> {
    edit(state, project, |plan| {
        plan.merge_sections(sources, into)?;
        let seats = plan.section(into).map_or(0, Section::seat_count);
        Ok(format!("Merged {} sections into '{into}' ({seats} seats)", sources.len()))
    })
}

pub fn add_seats(
    state: &AppState,
    project: &str,
    section: &str,
    row: &str,
    start: &str,
    end: &str,
) -> Result<String> {
    let Some(len) = expand_range_len(start, end) else {
        return Err(SeatingError::InvalidSeatRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    };
    if len > MAX_GENERATED_SEATS {
        return Err(SeatingError::TooManySeats {
            requested: len,
            limit: MAX_GENERATED_SEATS,
        });
    }
    edit(state, project, |plan| {
        let added = section_mut(plan, section)?.add_seat_range(row, start, end);
        Ok(format!("Added {added} seats to row {row}"))
    })
}

pub fn add_rows(state: &AppState, args: AddRowsArgs) -> Result<String> {
    let request = RowRangeRequest {
        start_row: args.start_row,
        end_row: args.end_row,
        start_seat: args.start_seat,
        end_seat: args.end_seat,
        parity: args.parity,
        continuous: args.continuous,
        row_prefix: args.prefix,
        row_suffix: args.suffix,
        unnumbered_rows: args.unnumbered,
    };
    edit(state, &args.project, |plan| {
        let outcome = section_mut(plan, &args.section)?.add_row_range(&request)?;
        Ok(format!(
            "Added {} seats across rows {}",
            outcome.seats_added,
            outcome.rows.join(", ")
        ))
    })
}

pub fn delete_seat(
    state: &AppState,
    project: &str,
    section: &str,
    row: &str,
    seat: &str,
) -> Result<String> {
    edit(state, project, |plan| {
        let removed = section_mut(plan, section)?.delete_seat(row, seat);
        Ok(if removed {
            format!("Seat {row}-{seat} deleted")
        } else {
            format!("Seat {row}-{seat} not present")
        })
    })
}

pub fn delete_row(state: &AppState, project: &str, section: &str, row: &str) -> Result<String> {
    edit(state, project, |plan| {
        let removed = section_mut(plan, section)?.delete_row(row);
        Ok(format!("Deleted {removed} seats from row {row}"))
    })
}

pub fn renumber_rows(
    state: &AppState,
    project: &str,
    section: &str,
    rows: &[String],
    start: &str,
    hash: bool,
) -> Result<String> {
    edit(state, project, |plan| {
        let mapping = section_mut(plan, section)?.renumber_rows(rows, start, hash);
        if mapping.is_empty() {
            return Err(SeatingError::InvalidRowRange {
                start: start.to_string(),
                end: start.to_string(),
            });
        }
        let pairs: Vec<String> = mapping
            .iter()
            .map(|(old, new)| format!("{old} -> {new}"))
            .collect();
        Ok(pairs.join("\n"))
    })
}
