use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::editor::opts::EditorOpts;
use crate::editor::state::{Blocked, Edit, EditorState};
use crate::foundation::error::{RubricError, RubricResult};

/// One editor action, in a form that can be stored and replayed.
///
/// Serialized with an `op` tag, e.g. `{"op": "set_anchor", "skill": 0, "anchor": 1, "value": 6.5}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Split the widest band with a new level.
    AddLevel,
    /// Remove a level.
    DeleteLevel {
        /// Level index.
        index: usize,
    },
    /// Move a level to a new position.
    ReorderLevel {
        /// Current index.
        from: usize,
        /// Target index.
        to: usize,
    },
    /// Change a level's name.
    RenameLevel {
        /// Level index.
        index: usize,
        /// New name.
        name: String,
    },
    /// Change a level's colour.
    RecolorLevel {
        /// Level index.
        index: usize,
        /// New colour token.
        color: String,
    },
    /// Change a level's description.
    DescribeLevel {
        /// Level index.
        index: usize,
        /// New description.
        description: String,
    },
    /// Move one boundary of one skill.
    SetAnchor {
        /// Skill column.
        skill: usize,
        /// Anchor index.
        anchor: usize,
        /// Requested score; quantized and clamped.
        value: f64,
    },
    /// Write or clear the criteria of one cell.
    SetCriteria {
        /// Skill column.
        skill: usize,
        /// Level index.
        level: usize,
        /// Criteria text; blank clears the cell.
        text: String,
    },
    /// Change the rubric name.
    RenameRubric {
        /// New name.
        name: String,
    },
}

/// Outcome of replaying a script of edits.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptReport {
    /// State after every op that went through.
    pub state: EditorState,
    /// Number of ops applied.
    pub applied: usize,
    /// Ops the editor refused, as `(position in script, reason)`.
    pub blocked: Vec<(usize, Blocked)>,
}

impl EditOp {
    /// Read a JSON array of ops.
    pub fn script_from_reader<R: std::io::Read>(r: R) -> RubricResult<Vec<EditOp>> {
        serde_json::from_reader(r)
            .map_err(|e| RubricError::serde(format!("parse edit script JSON: {e}")))
    }

    /// Read a JSON array of ops from a file.
    pub fn script_from_path(path: impl AsRef<Path>) -> RubricResult<Vec<EditOp>> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RubricError::serde(format!("open edit script '{}': {e}", path.display()))
        })?;
        Self::script_from_reader(BufReader::new(f))
    }
}

impl EditorState {
    /// Apply one op. Refusals come back as [`Edit::Blocked`]; bad indices are errors.
    pub fn apply(&self, op: &EditOp, opts: &EditorOpts) -> RubricResult<Edit> {
        let next = match op {
            EditOp::AddLevel => return Ok(self.add_level(opts)),
            EditOp::DeleteLevel { index } => return self.delete_level(*index),
            EditOp::ReorderLevel { from, to } => self.reorder_level(*from, *to)?,
            EditOp::RenameLevel { index, name } => self.rename_level(*index, name.as_str())?,
            EditOp::RecolorLevel { index, color } => self.recolor_level(*index, color.as_str())?,
            EditOp::DescribeLevel { index, description } => {
                self.describe_level(*index, description.as_str())?
            }
            EditOp::SetAnchor {
                skill,
                anchor,
                value,
            } => self.set_anchor(*skill, *anchor, *value)?,
            EditOp::SetCriteria { skill, level, text } => self.set_criteria(*skill, *level, text)?,
            EditOp::RenameRubric { name } => self.rename_rubric(name.as_str()),
        };
        Ok(Edit::Applied(next))
    }

    /// Apply ops in order, skipping refused ones. Stops at the first error.
    #[tracing::instrument(skip_all, fields(ops = ops.len()))]
    pub fn apply_all(&self, ops: &[EditOp], opts: &EditorOpts) -> RubricResult<ScriptReport> {
        let mut state = self.clone();
        let mut applied = 0;
        let mut blocked = Vec::new();
        for (pos, op) in ops.iter().enumerate() {
            match state.apply(op, opts).map_err(|e| at_position(pos, e))? {
                Edit::Applied(next) => {
                    state = next;
                    applied += 1;
                }
                Edit::Blocked(reason) => {
                    tracing::warn!(pos, %reason, "edit refused");
                    blocked.push((pos, reason));
                }
            }
        }
        Ok(ScriptReport {
            state,
            applied,
            blocked,
        })
    }
}

fn at_position(pos: usize, err: RubricError) -> RubricError {
    match err {
        RubricError::Index(msg) => RubricError::index(format!("op {pos}: {msg}")),
        RubricError::Validation(msg) => RubricError::validation(format!("op {pos}: {msg}")),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/ops.rs"]
mod tests;
