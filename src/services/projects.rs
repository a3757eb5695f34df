use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, SeatingError};
use crate::labels::natural_cmp;
use crate::models::SeatingPlan;

const EXTENSION: &str = "json";

/// Named plans saved as `{dir}/{name}.json`.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    dir: PathBuf,
    pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    pub name: String,
    pub modified: Option<DateTime<Utc>>,
}

impl ProjectStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pretty: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            dir: config.projects.dir.clone(),
            pretty: config.export.pretty_json,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        let trimmed = name.trim();
        let invalid = trimmed.is_empty()
            || trimmed != name
            || trimmed.starts_with('.')
            || trimmed.contains(['/', '\\', '\0'])
            || trimmed.contains("..");
        if invalid {
            return Err(SeatingError::InvalidProjectName(name.to_string()));
        }
        Ok(self.dir.join(format!("{name}.{EXTENSION}")))
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.path_for(name)?.is_file())
    }

    /// Write `plan` under `name`, replacing any previous save. The plan takes
    /// the project name.
    pub fn save(&self, name: &str, plan: &mut SeatingPlan) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        plan.name = name.to_string();
        fs::create_dir_all(&self.dir)?;

        // Write beside the target, then swap in
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, plan.to_json(self.pretty)?)?;
        fs::rename(&tmp, &path)?;
        info!(project = name, path = %path.display(), "project saved");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<SeatingPlan> {
        let path = self.path_for(name)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SeatingError::ProjectNotFound(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        let plan = SeatingPlan::from_json(&json)?;
        debug!(project = name, sections = plan.len(), "project loaded");
        Ok(plan)
    }

    pub fn list(&self) -> Result<Vec<ProjectInfo>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut projects = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "skipping non UTF-8 project file");
                continue;
            };
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .map(DateTime::<Utc>::from);
            projects.push(ProjectInfo {
                name: name.to_string(),
                modified,
            });
        }
        projects.sort_by(|a, b| natural_cmp(&a.name, &b.name));
        Ok(projects)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(project = name, "project deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(SeatingError::ProjectNotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// File name to offer when exporting: derived from the first section
/// ("Section A" -> "section_a_plan.json"), or `seating_plan.json`.
pub fn suggested_file_name(plan: &SeatingPlan) -> String {
    match plan.sections().first() {
        Some(section) => format!("{}_plan.json", section.name().to_lowercase().replace(' ', "_")),
        None => "seating_plan.json".to_string(),
    }
}
