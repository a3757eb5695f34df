use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::controllers::Format;
use crate::error::{Result, SeatingError};
use crate::models::{SeatingPlan, Section};
use crate::AppState;

pub fn list(state: &AppState) -> Result<String> {
    let projects = state.projects.list()?;
    if projects.is_empty() {
        return Ok(format!("No projects in {}", state.projects.dir().display()));
    }
    let lines: Vec<String> = projects
        .iter()
        .map(|p| match p.modified {
            Some(ts) => format!("{}\t{}", p.name, ts.format("%Y-%m-%d %H:%M")),
            None => p.name.clone(),
        })
        .collect();
    Ok(lines.join("\n"))
}

pub fn create(state: &AppState, project: &str, force: bool) -> Result<String> {
    if !force && state.projects.exists(project)? {
        return Err(SeatingError::ProjectExists(project.to_string()));
    }
    let mut plan = SeatingPlan::new(project);
    let path = state.projects.save(project, &mut plan)?;
    Ok(format!("Created {}", path.display()))
}

pub fn delete(state: &AppState, project: &str) -> Result<String> {
    state.projects.delete(project)?;
    Ok(format!("Deleted project '{project}'"))
}

fn describe_section(out: &mut String, section: &Section) {
    if section.is_general_admission {
        let capacity = section
            .capacity
            .map_or_else(|| "unset".to_string(), |c| c.to_string());
        let _ = writeln!(out, "{} (general admission, capacity {capacity})", section.name());
    } else {
        let _ = writeln!(out, "{} ({} seats)", section.name(), section.seat_count());
    }
    for row in section.rows() {
        let _ = writeln!(out, "  {row}: {}", section.seats_in_row(&row).join(" "));
    }
}

pub fn show(state: &AppState, project: &str, section: Option<&str>) -> Result<String> {
    let plan = state.projects.load(project)?;
    let mut out = String::new();
    match section {
        Some(name) => {
            let section = plan
                .section(name)
                .ok_or_else(|| SeatingError::SectionNotFound(name.to_string()))?;
            describe_section(&mut out, section);
        }
        None => {
            let _ = writeln!(out, "{} ({} sections)", plan.name, plan.len());
            for section in plan.sections() {
                describe_section(&mut out, section);
            }
        }
    }
    Ok(out.trim_end().to_string())
}

pub fn export(state: &AppState, project: &str, format: Format, out: Option<&Path>) -> Result<String> {
    let plan = state.projects.load(project)?;
    let rendered = match format {
        Format::Json => plan.to_json(state.config.export.pretty_json)?,
        Format::Table => plan.to_table(state.config.export.include_ga_rows),
    };
    match out {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(project, path = %path.display(), "plan exported");
            Ok(format!("Exported '{project}' to {}", path.display()))
        }
        None => Ok(rendered),
    }
}

pub fn import(state: &AppState, project: &str, path: &Path, format: Format) -> Result<String> {
    let text = fs::read_to_string(path)?;
    let mut plan = match format {
        Format::Json => SeatingPlan::from_json(&text)?,
        Format::Table => SeatingPlan::from_table(project, &text)?,
    };
    state.projects.save(project, &mut plan)?;
    Ok(format!(
        "Imported {} sections into '{project}'",
        plan.len()
    ))
}
