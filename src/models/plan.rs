use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::{MergeConflict, MergeConflicts, Result, SeatingError};
use crate::models::{SeatKey, Section};

// "Hall 3" -> ("Hall", 3)
static NUMBERED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*?)\s+([0-9]+)$").expect("Invalid numbered section name regex")
});

/// A venue layout: named sections kept in display order.
///
/// Section names are unique; each section's own `name` is its lookup key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatingPlan {
    pub name: String,
    sections: Vec<Section>,
}

impl SeatingPlan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
        }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(Section::name).collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name() == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.name() == name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name() == name)
    }

    /// Add an empty section. Returns `false` when the name is taken.
    pub fn add_section(&mut self, name: &str, is_general_admission: bool) -> bool {
        if self.contains_section(name) {
            debug!(section = name, "section already exists");
            return false;
        }
        let mut section = Section::new(name);
        section.is_general_admission = is_general_admission;
        self.sections.push(section);
        info!(section = name, is_general_admission, "section added");
        true
    }

    /// Like [`add_section`](Self::add_section) but a taken name is an error.
    pub fn create_section(&mut self, name: &str, is_general_admission: bool) -> Result<&mut Section> {
        if !self.add_section(name, is_general_admission) {
            return Err(SeatingError::SectionExists(name.to_string()));
        }
        self.section_mut(name)
            .ok_or_else(|| SeatingError::SectionNotFound(name.to_string()))
    }

    /// Register a fully built section under its own name.
    pub fn insert_section(&mut self, section: Section) -> Result<()> {
        if self.contains_section(section.name()) {
            return Err(SeatingError::SectionExists(section.name().to_string()));
        }
        self.sections.push(section);
        Ok(())
    }

    pub fn delete_section(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(idx) => {
                self.sections.remove(idx);
                info!(section = name, "section deleted");
                true
            }
            None => false,
        }
    }

    /// Rename in place, keeping display position. No-op unless `old` exists
    /// and `new` does not.
    pub fn rename_section(&mut self, old: &str, new: &str) -> bool {
        self.try_rename_section(old, new).is_ok()
    }

    pub fn try_rename_section(&mut self, old: &str, new: &str) -> Result<()> {
        if self.contains_section(new) {
            return Err(SeatingError::SectionExists(new.to_string()));
        }
        let section = self
            .section_mut(old)
            .ok_or_else(|| SeatingError::SectionNotFound(old.to_string()))?;
        section.rename(new);
        info!(old, new, "section renamed");
        Ok(())
    }

    /// Deep copy `name` as `new_name`.
    pub fn clone_section(&mut self, name: &str, new_name: &str) -> Result<()> {
        if self.contains_section(new_name) {
            return Err(SeatingError::SectionExists(new_name.to_string()));
        }
        let mut copy = self
            .section(name)
            .ok_or_else(|| SeatingError::SectionNotFound(name.to_string()))?
            .duplicate();
        copy.rename(new_name);
        self.sections.push(copy);
        info!(source = name, section = new_name, "section cloned");
        Ok(())
    }

    /// Clone `name` `count` times with auto-numbered names.
    ///
    /// "Hall 3" continues at "Hall 4"; a name without a trailing number
    /// starts at "{name} 2". Names already in the plan are skipped. Returns
    /// the created names in creation order, fewer than `count` if the
    /// numbering runs out.
    pub fn clone_section_many(&mut self, name: &str, count: usize) -> Vec<String> {
        let Some(source) = self.section(name) else {
            debug!(section = name, "clone source not found");
            return Vec::new();
        };
        let source = source.clone();
        let (prefix, start) = numbered_name(name);

        let mut created = Vec::with_capacity(count);
        let mut n = start;
        while created.len() < count {
            let Some(next) = n.checked_add(1) else {
                debug!(section = name, "clone numbering exhausted");
                break;
            };
            n = next;
            let candidate = format!("{prefix} {n}");
            if self.contains_section(&candidate) {
                continue;
            }
            let mut copy = source.clone();
            copy.rename(candidate.as_str());
            self.sections.push(copy);
            created.push(candidate);
        }
        if !created.is_empty() {
            info!(source = name, count = created.len(), "sections cloned");
        }
        created
    }

    /// Put the named sections first, in the given order. Other sections keep
    /// their relative order after them; unknown names are ignored.
    pub fn reorder_sections<S: AsRef<str>>(&mut self, order: &[S]) {
        let mut remaining = std::mem::take(&mut self.sections);
        let mut reordered = Vec::with_capacity(remaining.len());
        for name in order {
            if let Some(idx) = remaining.iter().position(|s| s.name() == name.as_ref()) {
                reordered.push(remaining.remove(idx));
            }
        }
        reordered.append(&mut remaining);
        self.sections = reordered;
    }

    /// Move one seat between sections. Absent seats are a no-op.
    pub fn move_seat(&mut self, from: &str, to: &str, row: &str, seat: &str) -> Result<bool> {
        if !self.contains_section(to) {
            return Err(SeatingError::SectionNotFound(to.to_string()));
        }
        let source = self
            .section_mut(from)
            .ok_or_else(|| SeatingError::SectionNotFound(from.to_string()))?;
        if from == to {
            return Ok(false);
        }
        let Some(moved) = source.take_seat(row, seat) else {
            return Ok(false);
        };
        if let Some(target) = self.section_mut(to) {
            target.insert_seat(moved);
        }
        Ok(true)
    }

    /// Combine the seats of `sources` into a new section `new_name`.
    ///
    /// Needs two or more distinct, existing sources and an unused name. When
    /// any (row, seat) pair is held by more than one source nothing changes
    /// and every collision is reported. Sources are left as they are. The
    /// result is general admission only when every source is.
    pub fn merge_sections<S: AsRef<str>>(&mut self, sources: &[S], new_name: &str) -> Result<()> {
        if sources.len() < 2 {
            return Err(SeatingError::TooFewSources(sources.len()));
        }
        let mut seen = HashSet::new();
        let mut parts = Vec::with_capacity(sources.len());
        for name in sources {
            let name = name.as_ref();
            if !seen.insert(name) {
                return Err(SeatingError::DuplicateSource(name.to_string()));
            }
            let section = self
                .section(name)
                .ok_or_else(|| SeatingError::SectionNotFound(name.to_string()))?;
            parts.push(section);
        }
        if self.contains_section(new_name) {
            return Err(SeatingError::SectionExists(new_name.to_string()));
        }

        let mut owners: HashMap<&SeatKey, Vec<&str>> = HashMap::new();
        for section in &parts {
            for key in section.keys() {
                owners.entry(key).or_default().push(section.name());
            }
        }
        let mut conflicts: Vec<MergeConflict> = owners
            .into_iter()
            .filter(|(_, names)| names.len() > 1)
            .map(|(key, names)| MergeConflict {
                key: key.clone(),
                sources: names.into_iter().map(str::to_string).collect(),
            })
            .collect();
        if !conflicts.is_empty() {
            conflicts.sort_by(|a, b| a.key.natural_cmp(&b.key));
            debug!(section = new_name, conflicts = conflicts.len(), "merge rejected");
            return Err(SeatingError::MergeConflict(MergeConflicts(conflicts)));
        }

        let all_ga = parts.iter().all(|s| s.is_general_admission);
        let mut merged = if all_ga {
            let capacity = parts
                .iter()
                .filter_map(|s| s.capacity)
                .reduce(u32::saturating_add);
            Section::general_admission(new_name, capacity)
        } else {
            Section::new(new_name)
        };
        for section in &parts {
            for seat in section.seats() {
                merged.insert_seat(seat.clone());
            }
        }
        self.sections.push(merged);
        info!(section = new_name, sources = sources.len(), "sections merged");
        Ok(())
    }
}

/// Split a section name into its base and trailing number. A name without a
/// whitespace-separated trailing number counts as number 1.
pub fn numbered_name(name: &str) -> (String, u64) {
    if let Some(caps) = NUMBERED_NAME_RE.captures(name) {
        if let Ok(n) = caps[2].parse::<u64>() {
            return (caps[1].to_string(), n);
        }
    }
    (name.trim_end().to_string(), 1)
}
