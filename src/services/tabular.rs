//! Spreadsheet-style plan listing: one line per (section, row), seats
//! joined by commas, plus a line per general-admission section.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SeatingError};
use crate::models::{SeatingPlan, Section};

pub const TABLE_HEADER: [&str; 6] = ["section", "rows", "seats", "secnam", "capacity", "type"];

/// `type` column value for general-admission lines.
pub const GA_TYPE: &str = "GA";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// 1-based position of the section in the plan.
    pub section: usize,
    pub rows: String,
    pub seats: String,
    pub secnam: String,
    pub capacity: Option<u32>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TableRow {
    pub fn is_general_admission(&self) -> bool {
        self.kind.eq_ignore_ascii_case(GA_TYPE)
    }
}

fn section_rows(position: usize, section: &Section, include_ga_rows: bool) -> Vec<TableRow> {
    let mut lines: Vec<TableRow> = section
        .rows()
        .into_iter()
        .map(|row| {
            let seats = section.seats_in_row(&row);
            TableRow {
                section: position,
                capacity: u32::try_from(seats.len()).ok(),
                seats: seats.join(","),
                rows: row,
                secnam: section.name().to_string(),
                kind: String::new(),
            }
        })
        .collect();
    if section.is_general_admission && include_ga_rows {
        lines.push(TableRow {
            section: position,
            rows: String::new(),
            seats: String::new(),
            secnam: section.name().to_string(),
            capacity: section.capacity,
            kind: GA_TYPE.to_string(),
        });
    }
    lines
}

pub fn to_table_rows(plan: &SeatingPlan, include_ga_rows: bool) -> Vec<TableRow> {
    plan.sections()
        .iter()
        .enumerate()
        .flat_map(|(idx, section)| section_rows(idx + 1, section, include_ga_rows))
        .collect()
}

/// Rebuild a plan from table lines. Sections appear in first-seen order.
pub fn from_table_rows(name: &str, rows: &[TableRow]) -> Result<SeatingPlan> {
    let mut plan = SeatingPlan::new(name);
    for (idx, line) in rows.iter().enumerate() {
        if line.secnam.is_empty() {
            return Err(SeatingError::Table {
                line: idx + 2,
                message: "missing section name".to_string(),
            });
        }
        plan.add_section(&line.secnam, false);
        let Some(section) = plan.section_mut(&line.secnam) else {
            continue;
        };
        if line.is_general_admission() {
            section.is_general_admission = true;
            section.capacity = line.capacity;
            continue;
        }
        let seats: Vec<&str> = line
            .seats
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        section.add_seats(&line.rows, &seats);
    }
    debug!(sections = plan.len(), lines = rows.len(), "table imported");
    Ok(plan)
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn to_csv(rows: &[TableRow]) -> String {
    let mut out = TABLE_HEADER.join(",");
    out.push('\n');
    for row in rows {
        let fields = [
            row.section.to_string(),
            quote(&row.rows),
            quote(&row.seats),
            quote(&row.secnam),
            row.capacity.map(|c| c.to_string()).unwrap_or_default(),
            quote(&row.kind),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// A parsed CSV record and the line it starts on (1-based).
type Record = (usize, Vec<String>);

fn finish_record(records: &mut Vec<Record>, line: usize, fields: Vec<String>) {
    let blank = matches!(fields.as_slice(), [only] if only.trim().is_empty());
    if !blank {
        records.push((line, fields));
    }
}

/// Read every record of `text`. Quoted fields may hold commas, doubled
/// quotes and line breaks; blank lines are skipped.
fn read_records(text: &str) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match (quoted, ch) {
            (true, '"') if chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            (true, '"') => quoted = false,
            (true, c) => {
                if c == '\n' {
                    line += 1;
                }
                field.push(c);
            }
            (false, '"') => quoted = true,
            (false, ',') => fields.push(std::mem::take(&mut field)),
            (false, '\r') if chars.peek() == Some(&'\n') => {}
            (false, '\n') => {
                fields.push(std::mem::take(&mut field));
                finish_record(&mut records, record_line, std::mem::take(&mut fields));
                line += 1;
                record_line = line;
            }
            (false, c) => field.push(c),
        }
    }
    if quoted {
        return Err(SeatingError::Table {
            line: record_line,
            message: "unterminated quoted field".to_string(),
        });
    }
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        finish_record(&mut records, record_line, fields);
    }
    Ok(records)
}

pub fn from_csv(text: &str) -> Result<Vec<TableRow>> {
    let mut records = read_records(text)?.into_iter();

    let Some((header_line, header)) = records.next() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = header
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();
    if header != TABLE_HEADER {
        return Err(SeatingError::Table {
            line: header_line,
            message: format!("expected header {}", TABLE_HEADER.join(",")),
        });
    }

    let mut rows = Vec::new();
    for (line_no, fields) in records {
        let table_err = |message: String| SeatingError::Table {
            line: line_no,
            message,
        };
        let [section, row, seats, secnam, capacity, kind] = fields.as_slice() else {
            return Err(table_err(format!("expected 6 fields, got {}", fields.len())));
        };
        let section = section
            .trim()
            .parse()
            .map_err(|_| table_err(format!("bad section number '{section}'")))?;
        let capacity = match capacity.trim() {
            "" => None,
            raw => Some(
                raw.parse()
                    .map_err(|_| table_err(format!("bad capacity '{raw}'")))?,
            ),
        };
        rows.push(TableRow {
            section,
            rows: row.trim().to_string(),
            seats: seats.clone(),
            secnam: secnam.trim().to_string(),
            capacity,
            kind: kind.trim().to_string(),
        });
    }
    Ok(rows)
}

impl SeatingPlan {
    pub fn to_table(&self, include_ga_rows: bool) -> String {
        to_csv(&to_table_rows(self, include_ga_rows))
    }

    pub fn from_table(name: &str, csv: &str) -> Result<Self> {
        from_table_rows(name, &from_csv(csv)?)
    }
}
