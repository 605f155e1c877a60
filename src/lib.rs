//! Skillmatrix is the editing engine behind a club's skill-level rubric.
//!
//! A rubric is a set of named, coloured levels shared by every skill. Each skill splits the
//! score range `[0, 10]` into one band per level, at its own boundaries, and may attach a line
//! of criteria text to any (skill, level) cell.
//!
//! # Data flow
//!
//! 1. **Decode**: a persisted [`SkillMatrix`] becomes an [`EditorState`] ([`decode`])
//! 2. **Edit**: pure operations on [`EditorState`] each return a new state, or an
//!    [`Edit::Blocked`] when the editor refuses
//! 3. **Encode**: the state becomes a full-replace [`UpdateSkillMatrixRequest`] ([`encode`])
//!
//! Boundaries always sit on the half-point grid, strictly increase and stay at least 0.5 apart.
//! Every edit preserves that; [`EditorState::validate`] re-checks it.
//!
//! See [`crate::guide`] for a walkthrough.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod editor;
mod foundation;
mod rubric;

/// Walkthrough of the editing model and its operations.
pub mod guide;

pub use editor::drag::{AnchorDrag, DragController, pointer_to_score};
pub use editor::ops::{EditOp, ScriptReport};
pub use editor::opts::EditorOpts;
pub use editor::palette::{COLOR_PALETTE, FALLBACK_COLOR, is_hex_color, next_unused_color};
pub use editor::session::{CriteriaDraft, EditorSession};
pub use editor::state::{BandView, Blocked, Edit, EditorState, Level, LevelId};
pub use editor::transcode::{decode, encode};
pub use foundation::core::{Point, Rect, SCORE_MAX, Score, SkillCatalog, SkillName, round_to_half};
pub use foundation::error::{RubricError, RubricResult};
pub use rubric::model::{Band, SkillBands, SkillMatrix, UpdateSkillMatrixRequest};
pub use rubric::template::{DEFAULT_LEVELS, default_matrix, evenly_spaced_anchors};
