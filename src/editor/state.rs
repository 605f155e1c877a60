use std::collections::BTreeMap;
use std::fmt;

use crate::editor::criteria::CriteriaMap;
use crate::foundation::core::{Score, SkillCatalog, SkillName};
use crate::foundation::error::{RubricError, RubricResult};

/// Stable identity of a level inside one editor state.
///
/// Levels are addressed by index in every public operation; the id only exists so that criteria
/// follow their level through inserts, deletes and moves without re-keying.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LevelId(u32);

/// One proficiency tier shared by every skill.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Level {
    /// Display name, e.g. `"Advanced"`.
    pub name: String,
    /// Colour token, e.g. `"#22c55e"`.
    pub color: String,
    /// Free-text description shown in the level list.
    pub description: String,
}

impl Level {
    /// Build a level.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            description: description.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct LevelSlot {
    pub(crate) id: LevelId,
    pub(crate) level: Level,
}

/// The complete, index-addressed rubric being edited.
///
/// Every edit takes `&self` and returns a fresh value; an `EditorState` is never changed after
/// it has been handed out. Equality is observational: two states are equal when they show the
/// same levels, anchors and criteria at the same indices, whatever their internal level ids.
#[derive(Clone, Debug)]
pub struct EditorState {
    pub(crate) name: String,
    pub(crate) skills: Vec<SkillName>,
    pub(crate) levels: Vec<LevelSlot>,
    /// `anchors[skill][i]` is the upper bound of level `i`.
    pub(crate) anchors: Vec<Vec<Score>>,
    pub(crate) criteria: CriteriaMap,
    pub(crate) next_id: u32,
}

/// Read-only view of one level as seen by one skill column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandView<'a> {
    /// Level index.
    pub index: usize,
    /// Shared level metadata.
    pub level: &'a Level,
    /// Lower bound (`0` for the first level).
    pub min: Score,
    /// Upper bound (`10` for the last level).
    pub max: Score,
    /// Criteria text for this skill and level, if any.
    pub criteria: Option<&'a str>,
}

/// Why a structural edit was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blocked {
    /// Deleting would leave fewer than two levels.
    MinimumLevels,
    /// No gap is wide enough, in every skill, to split with a new level.
    NoRoom,
}

impl fmt::Display for Blocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocked::MinimumLevels => f.write_str("a rubric needs at least two levels"),
            Blocked::NoRoom => f.write_str("no score gap is wide enough for another level"),
        }
    }
}

/// Result of a structural edit that the editor may refuse without it being an error.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub enum Edit {
    /// The edit went through; this is the new state.
    Applied(EditorState),
    /// The edit was refused; the current state stays as it is.
    Blocked(Blocked),
}

impl Edit {
    /// The new state, if the edit was applied.
    pub fn applied(self) -> Option<EditorState> {
        match self {
            Edit::Applied(state) => Some(state),
            Edit::Blocked(_) => None,
        }
    }

    /// True when the edit was refused.
    pub fn is_blocked(&self) -> bool {
        matches!(self, Edit::Blocked(_))
    }

    /// The new state, or a copy of `current` when the edit was refused.
    pub fn or_keep(self, current: &EditorState) -> EditorState {
        match self {
            Edit::Applied(state) => state,
            Edit::Blocked(_) => current.clone(),
        }
    }
}

impl EditorState {
    /// Build a state with no criteria, validating every invariant.
    ///
    /// `anchors` is indexed by skill in `catalog` order and must hold `levels.len() - 1` scores
    /// per skill.
    pub fn new(
        name: impl Into<String>,
        catalog: &SkillCatalog,
        levels: Vec<Level>,
        anchors: Vec<Vec<Score>>,
    ) -> RubricResult<Self> {
        let state = Self::from_parts(
            name.into(),
            catalog.as_slice().to_vec(),
            levels,
            anchors,
            Vec::new(),
        );
        state.validate()?;
        Ok(state)
    }

    /// Assemble a state without validating it. `criteria` is keyed by
    /// `(skill index, level index)`; entries pointing past the level list and blank entries are
    /// dropped, the rest are kept verbatim.
    pub(crate) fn from_parts(
        name: String,
        skills: Vec<SkillName>,
        levels: Vec<Level>,
        anchors: Vec<Vec<Score>>,
        criteria: Vec<(usize, usize, String)>,
    ) -> Self {
        let levels: Vec<LevelSlot> = levels
            .into_iter()
            .zip(0u32..)
            .map(|(level, id)| LevelSlot {
                id: LevelId(id),
                level,
            })
            .collect();
        let mut map = CriteriaMap::default();
        for (skill, level, text) in criteria {
            if let Some(slot) = levels.get(level) {
                map.insert_stored(skill, slot.id, &text);
            }
        }
        let criteria = map;
        let next_id = u32::try_from(levels.len()).unwrap_or(u32::MAX);
        Self {
            name,
            skills,
            levels,
            anchors,
            criteria,
            next_id,
        }
    }

    pub(crate) fn alloc_level_id(&mut self) -> LevelId {
        let id = LevelId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Rubric name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Skills in column order.
    pub fn skills(&self) -> &[SkillName] {
        &self.skills
    }

    /// Column index of a skill.
    pub fn skill_index(&self, skill: &SkillName) -> Option<usize> {
        self.skills.iter().position(|s| s == skill)
    }

    /// Number of levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Level at an index.
    pub fn level(&self, index: usize) -> Option<&Level> {
        self.levels.get(index).map(|slot| &slot.level)
    }

    /// Levels in order.
    pub fn levels(&self) -> impl ExactSizeIterator<Item = &Level> + '_ {
        self.levels.iter().map(|slot| &slot.level)
    }

    /// Stable id of the level currently at `index`.
    pub fn level_id(&self, index: usize) -> Option<LevelId> {
        self.levels.get(index).map(|slot| slot.id)
    }

    /// Current index of a level id.
    pub fn level_index(&self, id: LevelId) -> Option<usize> {
        self.levels.iter().position(|slot| slot.id == id)
    }

    /// Anchors of one skill column.
    pub fn anchors(&self, skill: usize) -> Option<&[Score]> {
        self.anchors.get(skill).map(Vec::as_slice)
    }

    /// All anchors, outer index is the skill column.
    pub fn all_anchors(&self) -> &[Vec<Score>] {
        &self.anchors
    }

    /// Whether the delete affordance should be offered.
    pub fn can_delete_level(&self) -> bool {
        self.levels.len() > 2
    }

    /// Lower bound of a level in one skill, `0` for the first level.
    pub(crate) fn lower_bound(&self, skill: usize, level: usize) -> Score {
        match level {
            0 => Score::MIN,
            _ => self.anchors[skill][level - 1],
        }
    }

    /// Upper bound of a level in one skill, `10` for the last level.
    pub(crate) fn upper_bound(&self, skill: usize, level: usize) -> Score {
        self.anchors[skill]
            .get(level)
            .copied()
            .unwrap_or(Score::MAX)
    }

    pub(crate) fn check_skill(&self, skill: usize) -> RubricResult<()> {
        if skill >= self.skills.len() {
            return Err(RubricError::index(format!(
                "skill index {skill} out of range for {} skills",
                self.skills.len()
            )));
        }
        Ok(())
    }

    pub(crate) fn check_level(&self, level: usize) -> RubricResult<()> {
        if level >= self.levels.len() {
            return Err(RubricError::index(format!(
                "level index {level} out of range for {} levels",
                self.levels.len()
            )));
        }
        Ok(())
    }

    /// Bands of one skill column, level by level.
    pub fn bands(&self, skill: usize) -> RubricResult<Vec<BandView<'_>>> {
        self.check_skill(skill)?;
        Ok(self.band_views(skill).collect())
    }

    pub(crate) fn band_views(&self, skill: usize) -> impl Iterator<Item = BandView<'_>> + '_ {
        self.levels
            .iter()
            .enumerate()
            .map(move |(index, slot)| BandView {
                index,
                level: &slot.level,
                min: self.lower_bound(skill, index),
                max: self.upper_bound(skill, index),
                criteria: self.criteria.get(skill, slot.id),
            })
    }

    /// Criteria keyed by `(skill index, level index)`.
    pub fn criteria_by_index(&self) -> BTreeMap<(usize, usize), &str> {
        let mut out = BTreeMap::new();
        for (level_idx, slot) in self.levels.iter().enumerate() {
            for skill in 0..self.skills.len() {
                if let Some(text) = self.criteria.get(skill, slot.id) {
                    out.insert((skill, level_idx), text);
                }
            }
        }
        out
    }

    /// Number of (skill, level) cells that carry criteria.
    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }

    /// Re-check every structural invariant.
    ///
    /// Holds after any edit produced by this crate; exposed for hosts that assemble states from
    /// their own data and for tests.
    pub fn validate(&self) -> RubricResult<()> {
        if self.skills.is_empty() {
            return Err(RubricError::validation("editor state has no skills"));
        }
        if self.levels.len() < 2 {
            return Err(RubricError::validation(format!(
                "editor state needs at least 2 levels, has {}",
                self.levels.len()
            )));
        }
        if self.anchors.len() != self.skills.len() {
            return Err(RubricError::validation(format!(
                "expected anchors for {} skills, found {}",
                self.skills.len(),
                self.anchors.len()
            )));
        }
        for (skill, anchors) in self.skills.iter().zip(&self.anchors) {
            if anchors.len() + 1 != self.levels.len() {
                return Err(RubricError::validation(format!(
                    "skill '{skill}' has {} anchors for {} levels",
                    anchors.len(),
                    self.levels.len()
                )));
            }
            let mut prev = Score::MIN;
            for a in anchors.iter().copied().chain(std::iter::once(Score::MAX)) {
                // On the half-unit grid, strictly greater means at least 0.5 apart.
                if a <= prev {
                    return Err(RubricError::validation(format!(
                        "skill '{skill}' boundaries must rise by {} (found {prev} then {a})",
                        Score::STEP
                    )));
                }
                prev = a;
            }
        }
        for (idx, slot) in self.levels.iter().enumerate() {
            if self.levels[..idx].iter().any(|s| s.id == slot.id) {
                return Err(RubricError::validation(format!(
                    "level {idx} shares its id with an earlier level"
                )));
            }
        }
        for (skill, level, text) in self.criteria.iter() {
            if skill >= self.skills.len() || self.level_index(level).is_none() {
                return Err(RubricError::validation(
                    "criteria entry refers to a missing skill or level",
                ));
            }
            if text.trim().is_empty() {
                return Err(RubricError::validation("criteria entries must be non-empty"));
            }
        }
        Ok(())
    }
}

impl PartialEq for EditorState {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.skills == other.skills
            && self.levels().eq(other.levels())
            && self.anchors == other.anchors
            && self.criteria_by_index() == other.criteria_by_index()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/state.rs"]
mod tests;
