//! # Skillmatrix guide
//!
//! A walkthrough of how a rubric is represented, edited and saved.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`SkillCatalog`](crate::SkillCatalog): the ordered skill list supplied by the host. Column
//!   `i` of the matrix is skill `i`.
//! - [`Level`](crate::Level): name, colour and description shared by every skill.
//! - [`Score`](crate::Score): a value on the half-point grid in `[0, 10]`.
//! - Anchors: per skill, the `levels - 1` interior boundaries. Level `i` covers
//!   `[anchor[i-1], anchor[i])`, with `0` and `10` as the implicit outer edges.
//! - Criteria: optional text per (skill, level) cell.
//!
//! All of this lives in [`EditorState`](crate::EditorState). Every operation takes `&self` and
//! returns a new state, so an old state can be kept for undo or comparison.
//!
//! ---
//!
//! ## Loading and saving
//!
//! The host stores a [`SkillMatrix`](crate::SkillMatrix), where every skill repeats the full
//! band list. [`decode`](crate::decode) reads level metadata from the first stored skill and
//! anchors and criteria from each skill. [`encode`](crate::encode) writes the bands back out for
//! every skill, ready to submit as an
//! [`UpdateSkillMatrixRequest`](crate::UpdateSkillMatrixRequest).
//!
//! A brand new rubric starts from [`default_matrix`](crate::default_matrix): five evenly spaced
//! levels from Beginner to Elite.
//!
//! ---
//!
//! ## Structural edits
//!
//! - [`add_level`](crate::EditorState::add_level) splits the band that is widest across all
//!   skills. The new level takes the lower half. If no band is at least one point wide in every
//!   skill the edit is refused with [`Blocked::NoRoom`](crate::Blocked::NoRoom).
//! - [`delete_level`](crate::EditorState::delete_level) lets the level above absorb the deleted
//!   range. Two levels is the minimum.
//! - [`reorder_level`](crate::EditorState::reorder_level) moves a level together with its band
//!   width in every skill.
//!
//! Criteria follow their level through all three.
//!
//! ---
//!
//! ## Dragging boundaries
//!
//! A pointer position inside a skill column maps linearly to a score: top edge 10, bottom edge
//! 0. [`DragController`](crate::DragController) owns the single active gesture; each sample is
//! snapped to the half grid and kept at least 0.5 away from the neighbouring boundaries.
//!
//! [`EditorSession`](crate::EditorSession) wraps a state with the rest of the transient UI: the
//! criteria popover and the colour picker.
//!
//! ---
//!
//! ## Scripted edits
//!
//! [`EditOp`](crate::EditOp) is the serializable form of every edit. The `skillmatrix apply`
//! command replays a JSON array of them against a stored rubric.
