//! `seatmap` subcommands. Each one loads a project, applies a single plan
//! operation and saves it back.

pub mod projects;
pub mod sections;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::Result;
use crate::models::SeatingPlan;
use crate::services::Parity;
use crate::AppState;

#[derive(Debug, Parser)]
#[command(name = "seatmap", version, about = "Build and edit venue seating plans")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List saved projects
    List,
    /// Create an empty project
    New {
        project: String,
        /// Replace an existing project of the same name
        #[arg(long)]
        force: bool,
    },
    /// Print a project's sections, rows and seats
    Show {
        project: String,
        #[arg(long)]
        section: Option<String>,
    },
    /// Delete a saved project
    Delete { project: String },
    AddSection {
        project: String,
        name: String,
        /// General admission (no discrete seats)
        #[arg(long)]
        ga: bool,
        #[arg(long)]
        capacity: Option<u32>,
    },
    DeleteSection { project: String, name: String },
    RenameSection {
        project: String,
        old: String,
        new: String,
    },
    /// Clone a section into auto-numbered copies ("Hall 1" -> "Hall 2", ...)
    CloneSection {
        project: String,
        name: String,
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Merge two or more sections into a new one
    Merge {
        project: String,
        #[arg(long)]
        into: String,
        #[arg(required = true, num_args = 2..)]
        sources: Vec<String>,
    },
    /// Add a run of seats to one row
    AddSeats {
        project: String,
        section: String,
        row: String,
        start: String,
        end: String,
    },
    /// Add a block of rows with seats
    AddRows(AddRowsArgs),
    DeleteSeat {
        project: String,
        section: String,
        row: String,
        seat: String,
    },
    DeleteRow {
        project: String,
        section: String,
        row: String,
    },
    /// Relabel rows consecutively from a start label
    RenumberRows {
        project: String,
        section: String,
        #[arg(long)]
        start: String,
        /// Prefix new labels with '#'
        #[arg(long)]
        hash: bool,
        #[arg(required = true)]
        rows: Vec<String>,
    },
    Export {
        project: String,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Create or replace a project from a JSON or table file
    Import {
        project: String,
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Debug, Args)]
pub struct AddRowsArgs {
    pub project: String,
    pub section: String,
    #[arg(long)]
    pub start_row: String,
    #[arg(long)]
    pub end_row: String,
    #[arg(long)]
    pub start_seat: String,
    #[arg(long)]
    pub end_seat: String,
    #[arg(long, value_enum, default_value_t = Parity::All)]
    pub parity: Parity,
    /// Keep counting seats across rows
    #[arg(long)]
    pub continuous: bool,
    #[arg(long, default_value = "")]
    pub prefix: String,
    #[arg(long, default_value = "")]
    pub suffix: String,
    /// Mark rows as unnumbered with a leading '#'
    #[arg(long)]
    pub unnumbered: bool,
}

/// Run one command against the project store and return what to print.
pub fn run(state: &AppState, command: Command) -> Result<String> {
    match command {
        Command::List => projects::list(state),
        Command::New { project, force } => projects::create(state, &project, force),
        Command::Show { project, section } => projects::show(state, &project, section.as_deref()),
        Command::Delete { project } => projects::delete(state, &project),
        Command::Export {
            project,
            format,
            out,
        } => projects::export(state, &project, format, out.as_deref()),
        Command::Import {
            project,
            path,
            format,
        } => projects::import(state, &project, &path, format),
        Command::AddSection {
            project,
            name,
            ga,
            capacity,
        } => sections::add_section(state, &project, &name, ga, capacity),
        Command::DeleteSection { project, name } => sections::delete_section(state, &project, &name),
        Command::RenameSection { project, old, new } => {
            sections::rename_section(state, &project, &old, &new)
        }
        Command::CloneSection {
            project,
            name,
            count,
        } => sections::clone_section(state, &project, &name, count),
        Command::Merge {
            project,
            into,
            sources,
        } => sections::merge(state, &project, &sources, &into),
        Command::AddSeats {
            project,
            section,
            row,
            start,
            end,
        } => sections::add_seats(state, &project, &section, &row, &start, &end),
        Command::AddRows(args) => sections::add_rows(state, args),
        Command::DeleteSeat {
            project,
            section,
            row,
            seat,
        } => sections::delete_seat(state, &project, &section, &row, &seat),
        Command::DeleteRow {
            project,
            section,
            row,
        } => sections::delete_row(state, &project, &section, &row),
        Command::RenumberRows {
            project,
            section,
            start,
            hash,
            rows,
        } => sections::renumber_rows(state, &project, &section, &rows, &start, hash),
    }
}

// Load, mutate, save. The closure's message is the command output.
pub(crate) fn edit<F>(state: &AppState, project: &str, apply: F) -> Result<String>
where
    F: FnOnce(&mut SeatingPlan) -> Result<String>,
{
    let mut plan = state.projects.load(project)?;
    let message = apply(&mut plan)?;
    state.projects.save(project, &mut plan)?;
    Ok(message)
}
