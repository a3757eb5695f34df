pub mod seat;
pub mod section;
pub mod plan;
pub mod document;

pub use seat::{Seat, SeatKey};
pub use section::Section;
pub use plan::SeatingPlan;
pub use document::{PlanDocument, RowDocument, SeatDocument, SectionDocument};
