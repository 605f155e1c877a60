use std::collections::BTreeMap;

use crate::editor::state::{EditorState, LevelId};
use crate::foundation::error::RubricResult;

/// Sparse criteria text, keyed by skill column and stable level id.
///
/// Absent keys mean "no criteria"; stored text is never empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CriteriaMap {
    entries: BTreeMap<(usize, LevelId), String>,
}

impl CriteriaMap {
    pub(crate) fn get(&self, skill: usize, level: LevelId) -> Option<&str> {
        self.entries.get(&(skill, level)).map(String::as_str)
    }

    /// Upsert trimmed text, or remove the key when the text is blank.
    pub(crate) fn set(&mut self, skill: usize, level: LevelId, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.entries.remove(&(skill, level));
        } else {
            self.entries.insert((skill, level), text.to_owned());
        }
    }

    /// Store persisted text exactly as given; blank text is skipped.
    pub(crate) fn insert_stored(&mut self, skill: usize, level: LevelId, text: &str) {
        if !text.trim().is_empty() {
            self.entries.insert((skill, level), text.to_owned());
        }
    }

    /// Forget every skill's criteria for a level.
    pub(crate) fn drop_level(&mut self, level: LevelId) {
        self.entries.retain(|&(_, l), _| l != level);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, LevelId, &str)> + '_ {
        self.entries
            .iter()
            .map(|(&(skill, level), text)| (skill, level, text.as_str()))
    }
}

impl EditorState {
    /// Criteria text for a skill column and level index.
    ///
    /// Out-of-range indices read as absent, the same as a cell with no criteria.
    pub fn criteria(&self, skill: usize, level: usize) -> Option<&str> {
        let id = self.level_id(level)?;
        self.criteria.get(skill, id)
    }

    /// Set the criteria text of one cell. Blank text removes the entry.
    ///
    /// Leading and trailing whitespace is dropped before storing.
    pub fn set_criteria(&self, skill: usize, level: usize, text: &str) -> RubricResult<Self> {
        self.check_skill(skill)?;
        self.check_level(level)?;
        let mut next = self.clone();
        let id = next.levels[level].id;
        next.criteria.set(skill, id, text);
        tracing::debug!(skill, level, cleared = text.trim().is_empty(), "criteria set");
        Ok(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/criteria.rs"]
mod tests;
