use crate::editor::state::EditorState;
use crate::foundation::core::{Point, Rect, SCORE_MAX, Score};
use crate::foundation::error::{RubricError, RubricResult};

/// Convert a pointer's vertical position inside a skill column into a raw score.
///
/// The column's top edge is 10, its bottom edge 0. Positions outside the column clamp to the
/// nearest end. Returns `None` for a column with no height.
pub fn pointer_to_score(column: Rect, pointer_y: f64) -> Option<f64> {
    let column = column.abs();
    let height = column.height();
    if height.is_nan() || height <= 0.0 || !pointer_y.is_finite() {
        return None;
    }
    let relative_y = pointer_y - column.y0;
    let percent = 100.0 - relative_y / height * 100.0;
    Some((percent / 100.0 * SCORE_MAX).clamp(0.0, SCORE_MAX))
}

impl EditorState {
    /// Scores an anchor may take without crowding its neighbors: `[lower + 0.5, upper - 0.5]`.
    pub fn anchor_range(&self, skill: usize, anchor: usize) -> RubricResult<(Score, Score)> {
        self.check_anchor(skill, anchor)?;
        let lower = self.lower_bound(skill, anchor);
        let upper = self.upper_bound(skill, anchor + 1);
        Ok((lower.step_up(), upper.step_down()))
    }

    /// Move one anchor to `value`, quantized and clamped between its neighbors.
    pub fn set_anchor(&self, skill: usize, anchor: usize, value: f64) -> RubricResult<Self> {
        let (lo, hi) = self.anchor_range(skill, anchor)?;
        let score = Score::quantize(value).max(lo).min(hi);
        let mut next = self.clone();
        next.anchors[skill][anchor] = score;
        Ok(next)
    }

    fn check_anchor(&self, skill: usize, anchor: usize) -> RubricResult<()> {
        self.check_skill(skill)?;
        if anchor >= self.anchors[skill].len() {
            return Err(RubricError::index(format!(
                "anchor index {anchor} out of range for {} anchors",
                self.anchors[skill].len()
            )));
        }
        Ok(())
    }
}

/// One pointer gesture resizing one boundary of one skill column.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorDrag {
    skill: usize,
    anchor: usize,
    column: Rect,
}

impl AnchorDrag {
    /// Start a drag on `anchor` of `skill`, capturing the column's bounding box.
    pub fn begin(
        state: &EditorState,
        skill: usize,
        anchor: usize,
        column: Rect,
    ) -> RubricResult<Self> {
        state.check_anchor(skill, anchor)?;
        let column = column.abs();
        if column.height().is_nan() || column.height() <= 0.0 {
            return Err(RubricError::validation(
                "drag column must have a positive height",
            ));
        }
        Ok(Self {
            skill,
            anchor,
            column,
        })
    }

    /// Skill column being dragged.
    pub fn skill(&self) -> usize {
        self.skill
    }

    /// Anchor index being dragged.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Captured column bounds.
    pub fn column(&self) -> Rect {
        self.column
    }

    /// Apply one pointer sample, returning the state with the dragged anchor moved.
    pub fn sample(&self, state: &EditorState, pointer: Point) -> RubricResult<EditorState> {
        let Some(raw) = pointer_to_score(self.column, pointer.y) else {
            return Ok(state.clone());
        };
        state.set_anchor(self.skill, self.anchor, raw)
    }
}

/// Owns the single active drag session of an editor.
///
/// A new gesture is ignored while one is active. Ending or cancelling tears the session down so
/// no sample can land after the pointer is released.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    active: Option<AnchorDrag>,
}

impl DragController {
    /// Controller with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active session, if any.
    pub fn active(&self) -> Option<&AnchorDrag> {
        self.active.as_ref()
    }

    /// True while a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start a session. Returns `false`, leaving the running session in place, when one is
    /// already active.
    pub fn begin(
        &mut self,
        state: &EditorState,
        skill: usize,
        anchor: usize,
        column: Rect,
    ) -> RubricResult<bool> {
        if let Some(current) = &self.active {
            tracing::debug!(
                skill,
                anchor,
                active_skill = current.skill,
                active_anchor = current.anchor,
                "ignoring overlapping drag start"
            );
            return Ok(false);
        }
        self.active = Some(AnchorDrag::begin(state, skill, anchor, column)?);
        tracing::debug!(skill, anchor, "drag started");
        Ok(true)
    }

    /// Feed a pointer sample. `None` when no session is active.
    pub fn pointer_moved(
        &self,
        state: &EditorState,
        pointer: Point,
    ) -> RubricResult<Option<EditorState>> {
        self.active
            .as_ref()
            .map(|drag| drag.sample(state, pointer))
            .transpose()
    }

    /// Finish the gesture. Every sample already wrote its value, so there is nothing to commit.
    pub fn end(&mut self) -> Option<AnchorDrag> {
        let ended = self.active.take();
        if ended.is_some() {
            tracing::debug!("drag ended");
        }
        ended
    }

    /// Abandon the gesture, e.g. when the pointer leaves the window.
    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            tracing::debug!("drag cancelled");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/drag.rs"]
mod tests;
