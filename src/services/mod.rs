pub mod row_range;
#[cfg(feature = "tabular")]
pub mod tabular;
#[cfg(feature = "projects")]
pub mod projects;

pub use row_range::{
    build_row_range, row_labels, Parity, RowRangeOutcome, RowRangeRequest, MAX_GENERATED_SEATS,
};
