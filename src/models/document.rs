//! Hierarchical plan document used for JSON persistence.
//!
//! Rows and seats are written in natural label order so re-exporting an
//! unchanged plan produces identical output.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SeatingError};
use crate::models::{SeatingPlan, Section};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    #[serde(default)]
    pub seating_plan_name: String,
    #[serde(default)]
    pub sections: Vec<SectionDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDocument {
    pub name: String,
    #[serde(default)]
    pub is_ga: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub rows: Vec<RowDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDocument {
    #[serde(deserialize_with = "label")]
    pub row_number: String,
    #[serde(default)]
    pub seats: Vec<SeatDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatDocument {
    #[serde(deserialize_with = "label")]
    pub seat_number: String,
}

// Older exports wrote plain numbers for numeric labels
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Integer(i64),
}

fn label<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    Ok(match RawLabel::deserialize(deserializer)? {
        RawLabel::Text(text) => text,
        RawLabel::Integer(n) => n.to_string(),
    })
}

impl From<&Section> for SectionDocument {
    fn from(section: &Section) -> Self {
        let rows = section
            .rows()
            .into_iter()
            .map(|row| {
                let seats = section
                    .seats_in_row(&row)
                    .into_iter()
                    .map(|seat_number| SeatDocument { seat_number })
                    .collect();
                RowDocument {
                    row_number: row,
                    seats,
                }
            })
            .collect();
        SectionDocument {
            name: section.name().to_string(),
            is_ga: section.is_general_admission,
            capacity: section.capacity,
            rows,
        }
    }
}

impl From<SectionDocument> for Section {
    fn from(doc: SectionDocument) -> Self {
        let mut section = Section::new(doc.name);
        section.is_general_admission = doc.is_ga;
        section.capacity = doc.capacity;
        for row in doc.rows {
            for seat in row.seats {
                section.add_seat(&row.row_number, &seat.seat_number);
            }
        }
        section
    }
}

impl From<&SeatingPlan> for PlanDocument {
    fn from(plan: &SeatingPlan) -> Self {
        PlanDocument {
            seating_plan_name: plan.name.clone(),
            sections: plan.sections().iter().map(SectionDocument::from).collect(),
        }
    }
}

impl TryFrom<PlanDocument> for SeatingPlan {
    type Error = SeatingError;

    fn try_from(doc: PlanDocument) -> Result<Self> {
        let mut plan = SeatingPlan::new(doc.seating_plan_name);
        for section in doc.sections {
            plan.insert_section(Section::from(section))?;
        }
        Ok(plan)
    }
}

impl SeatingPlan {
    pub fn to_document(&self) -> PlanDocument {
        PlanDocument::from(self)
    }

    pub fn from_document(doc: PlanDocument) -> Result<Self> {
        SeatingPlan::try_from(doc)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let doc = self.to_document();
        let json = if pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let doc: PlanDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }
}
