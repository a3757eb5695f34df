pub mod config;
pub mod error;
pub mod labels;
pub mod models;
pub mod services;
#[cfg(all(feature = "projects", feature = "tabular"))]
pub mod controllers;

pub use error::{MergeConflict, MergeConflicts, Result, SeatingError};
pub use models::{Seat, SeatKey, SeatingPlan, Section};

// Shared context for commands. Plans are loaded per command and passed
// explicitly, never held globally.
#[cfg(feature = "projects")]
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: config::Config,
    pub projects: services::projects::ProjectStore,
}

#[cfg(feature = "projects")]
impl AppState {
    pub fn new(config: config::Config) -> Self {
        let projects = services::projects::ProjectStore::from_config(&config);
        Self { config, projects }
    }
}
