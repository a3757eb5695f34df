use std::fmt;

use crate::models::SeatKey;

// Every fallible engine operation returns this error
#[derive(Debug, thiserror::Error)]
pub enum SeatingError {
    #[error("section '{0}' already exists")]
    SectionExists(String),

    #[error("section '{0}' not found")]
    SectionNotFound(String),

    #[error("merge needs at least two source sections, got {0}")]
    TooFewSources(usize),

    #[error("section '{0}' is listed more than once")]
    DuplicateSource(String),

    #[error("merge conflict: {0}")]
    MergeConflict(MergeConflicts),

    #[error("invalid row range '{start}'..'{end}'")]
    InvalidRowRange { start: String, end: String },

    #[error("invalid seat range '{start}'..'{end}'")]
    InvalidSeatRange { start: String, end: String },

    #[error("row range would create {requested} seats, more than the limit of {limit}")]
    TooManySeats { requested: u128, limit: u128 },

    #[error("continuous numbering needs numeric seats, got '{start}'..'{end}'")]
    NonNumericContinuous { start: String, end: String },

    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("project '{0}' not found")]
    ProjectNotFound(String),

    #[error("project '{0}' already exists")]
    ProjectExists(String),

    #[error("invalid project name '{0}'")]
    InvalidProjectName(String),

    #[error("table line {line}: {message}")]
    Table { line: usize, message: String },

    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, SeatingError>;

/// One seat key claimed by more than one merge source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
    pub key: SeatKey,
    pub sources: Vec<String>,
}

/// Every colliding key found while merging, in natural row/seat order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflicts(pub Vec<MergeConflict>);

impl MergeConflicts {
    pub fn iter(&self) -> impl Iterator<Item = &MergeConflict> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MergeConflicts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, conflict) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} in {}", conflict.key, conflict.sources.join(","))?;
        }
        Ok(())
    }
}
