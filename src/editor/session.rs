use crate::editor::drag::DragController;
use crate::editor::ops::EditOp;
use crate::editor::opts::EditorOpts;
use crate::editor::state::{Blocked, Edit, EditorState};
use crate::foundation::core::{Point, Rect};
use crate::foundation::error::RubricResult;

/// Criteria text being edited in a popover, not yet written to the state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CriteriaDraft {
    skill: usize,
    level: usize,
    text: String,
}

impl CriteriaDraft {
    /// Open a draft for one cell, seeded with its current text.
    pub fn open(state: &EditorState, skill: usize, level: usize) -> RubricResult<Self> {
        state.check_skill(skill)?;
        state.check_level(level)?;
        Ok(Self {
            skill,
            level,
            text: state.criteria(skill, level).unwrap_or_default().to_owned(),
        })
    }

    /// Skill column of the cell.
    pub fn skill(&self) -> usize {
        self.skill
    }

    /// Level index of the cell.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Current draft text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the draft text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Write the draft into `state`; blank text clears the cell.
    pub fn commit(&self, state: &EditorState) -> RubricResult<EditorState> {
        state.set_criteria(self.skill, self.level, &self.text)
    }
}

/// An open editor: the current state plus the transient UI around it.
///
/// At most one criteria popover, one colour picker and one drag gesture exist at a time.
/// Structural edits (add, delete, reorder) close the popover and the picker and cancel the drag,
/// since the indices they point at may have moved.
#[derive(Clone, Debug)]
pub struct EditorSession {
    state: EditorState,
    opts: EditorOpts,
    criteria: Option<CriteriaDraft>,
    color_picker: Option<usize>,
    drag: DragController,
}

impl EditorSession {
    /// Start editing `state`.
    pub fn new(state: EditorState, opts: EditorOpts) -> Self {
        Self {
            state,
            opts,
            criteria: None,
            color_picker: None,
            drag: DragController::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Editor options in effect.
    pub fn opts(&self) -> &EditorOpts {
        &self.opts
    }

    /// Finish editing, returning the final state.
    pub fn into_state(self) -> EditorState {
        self.state
    }

    /// Apply one edit. Returns the refusal reason when the editor declined it.
    pub fn apply(&mut self, op: &EditOp) -> RubricResult<Option<Blocked>> {
        match self.state.apply(op, &self.opts)? {
            Edit::Applied(next) => {
                if matches!(
                    op,
                    EditOp::AddLevel | EditOp::DeleteLevel { .. } | EditOp::ReorderLevel { .. }
                ) {
                    self.criteria = None;
                    self.color_picker = None;
                    self.drag.cancel();
                }
                self.state = next;
                Ok(None)
            }
            Edit::Blocked(reason) => Ok(Some(reason)),
        }
    }

    /// Open the criteria popover for a cell, replacing any open one.
    pub fn open_criteria(&mut self, skill: usize, level: usize) -> RubricResult<()> {
        self.criteria = Some(CriteriaDraft::open(&self.state, skill, level)?);
        Ok(())
    }

    /// Open popover, if any.
    pub fn criteria_draft(&self) -> Option<&CriteriaDraft> {
        self.criteria.as_ref()
    }

    /// Type into the open popover. Returns `false` when none is open.
    pub fn edit_criteria(&mut self, text: impl Into<String>) -> bool {
        match &mut self.criteria {
            Some(draft) => {
                draft.set_text(text);
                true
            }
            None => false,
        }
    }

    /// Save the open popover and close it. Returns `false` when none is open.
    pub fn confirm_criteria(&mut self) -> RubricResult<bool> {
        let Some(draft) = self.criteria.take() else {
            return Ok(false);
        };
        self.state = draft.commit(&self.state)?;
        Ok(true)
    }

    /// Close the popover without saving.
    pub fn cancel_criteria(&mut self) {
        self.criteria = None;
    }

    /// Open the colour picker for a level, or close it if it is already open for that level.
    pub fn toggle_color_picker(&mut self, level: usize) -> RubricResult<()> {
        self.state.check_level(level)?;
        self.color_picker = match self.color_picker {
            Some(open) if open == level => None,
            _ => Some(level),
        };
        Ok(())
    }

    /// Level whose colour picker is open.
    pub fn color_picker(&self) -> Option<usize> {
        self.color_picker
    }

    /// Choose a colour in the open picker, then close it. Returns `false` when none is open.
    pub fn pick_color(&mut self, color: impl Into<String>) -> RubricResult<bool> {
        let Some(level) = self.color_picker.take() else {
            return Ok(false);
        };
        self.state = self.state.recolor_level(level, color)?;
        Ok(true)
    }

    /// Start dragging a boundary. `false` when a drag is already running.
    pub fn begin_drag(&mut self, skill: usize, anchor: usize, column: Rect) -> RubricResult<bool> {
        self.drag.begin(&self.state, skill, anchor, column)
    }

    /// Feed a pointer position to the running drag, if any.
    pub fn drag_to(&mut self, pointer: Point) -> RubricResult<()> {
        if let Some(next) = self.drag.pointer_moved(&self.state, pointer)? {
            self.state = next;
        }
        Ok(())
    }

    /// Release the pointer.
    pub fn end_drag(&mut self) {
        let _ = self.drag.end();
    }

    /// Abandon the drag. Samples already applied stay applied.
    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }

    /// True while a drag is running.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
