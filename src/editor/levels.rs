use crate::editor::opts::EditorOpts;
use crate::editor::palette::next_unused_color;
use crate::editor::state::{Blocked, Edit, EditorState, Level, LevelSlot};
use crate::foundation::core::Score;
use crate::foundation::error::RubricResult;

impl EditorState {
    /// Index where [`EditorState::add_level`] would insert, if any level has room.
    ///
    /// Picks the level whose band is widest on average across skills. Only levels that are at
    /// least one full point wide in every skill qualify, so the split keeps every boundary 0.5
    /// apart. Ties go to the lowest index.
    pub fn add_level_index(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for level in 0..self.levels.len() {
            let mut total = 0u32;
            let mut narrowest = u8::MAX;
            for skill in 0..self.skills.len() {
                let gap = self
                    .lower_bound(skill, level)
                    .steps_to(self.upper_bound(skill, level));
                total += u32::from(gap);
                narrowest = narrowest.min(gap);
            }
            if narrowest < 2 {
                continue;
            }
            // Same skill count for every level, so comparing totals compares averages.
            if best.is_none_or(|(_, t)| total > t) {
                best = Some((level, total));
            }
        }
        best.map(|(level, _)| level)
    }

    /// Split the widest band with a new level.
    ///
    /// The new level takes the lower half of the chosen band in every skill; the level that
    /// was there moves up by one index together with its criteria.
    #[tracing::instrument(skip_all, fields(levels = self.levels.len()))]
    pub fn add_level(&self, opts: &EditorOpts) -> Edit {
        let Some(index) = self.add_level_index() else {
            tracing::debug!("add level blocked: no band wide enough in every skill");
            return Edit::Blocked(Blocked::NoRoom);
        };

        let color = next_unused_color(
            &opts.palette,
            self.levels.iter().map(|slot| slot.level.color.as_str()),
            self.levels.len(),
        )
        .unwrap_or_else(|| opts.fallback_color.clone());

        let mut next = self.clone();
        for skill in 0..next.skills.len() {
            let mid = self
                .lower_bound(skill, index)
                .midpoint(self.upper_bound(skill, index));
            next.anchors[skill].insert(index, mid);
        }
        let id = next.alloc_level_id();
        next.levels.insert(
            index,
            LevelSlot {
                id,
                level: Level::new(
                    opts.new_level_name.clone(),
                    color,
                    opts.new_level_description.clone(),
                ),
            },
        );
        tracing::debug!(index, "level added");
        Edit::Applied(next)
    }

    /// Remove the level at `index`; refused while only two levels remain.
    ///
    /// In every skill the removed level's upper boundary goes away, so the level above absorbs
    /// its range. Deleting the last level drops the last boundary instead, and the new last
    /// level stretches to 10.
    #[tracing::instrument(skip(self), fields(levels = self.levels.len()))]
    pub fn delete_level(&self, index: usize) -> RubricResult<Edit> {
        self.check_level(index)?;
        if !self.can_delete_level() {
            tracing::debug!("delete level blocked: minimum level count");
            return Ok(Edit::Blocked(Blocked::MinimumLevels));
        }

        let mut next = self.clone();
        let removed = next.levels.remove(index);
        for anchors in &mut next.anchors {
            if index < anchors.len() {
                anchors.remove(index);
            } else {
                anchors.pop();
            }
        }
        next.criteria.drop_level(removed.id);
        tracing::debug!(name = %removed.level.name, "level deleted");
        Ok(Edit::Applied(next))
    }

    /// Move the level at `from` to position `to`.
    ///
    /// Band widths travel with their level: each skill keeps the same set of widths, only in a
    /// new order, and its anchors are rebuilt from the running sum.
    #[tracing::instrument(skip(self))]
    pub fn reorder_level(&self, from: usize, to: usize) -> RubricResult<EditorState> {
        self.check_level(from)?;
        self.check_level(to)?;
        if from == to {
            return Ok(self.clone());
        }

        let mut next = self.clone();
        let moved = next.levels.remove(from);
        next.levels.insert(to, moved);

        for skill in 0..next.skills.len() {
            let mut widths: Vec<u8> = (0..self.levels.len())
                .map(|level| {
                    self.lower_bound(skill, level)
                        .steps_to(self.upper_bound(skill, level))
                })
                .collect();
            let width = widths.remove(from);
            widths.insert(to, width);

            let mut edge = Score::MIN;
            next.anchors[skill] = widths[..widths.len() - 1]
                .iter()
                .map(|&w| {
                    edge = edge.add_steps(w);
                    edge
                })
                .collect();
        }
        Ok(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/levels.rs"]
mod tests;
