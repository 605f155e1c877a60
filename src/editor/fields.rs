use crate::editor::state::{EditorState, Level};
use crate::foundation::error::RubricResult;

impl EditorState {
    /// Replace the name of the level at `index`.
    pub fn rename_level(&self, index: usize, name: impl Into<String>) -> RubricResult<Self> {
        let name = name.into();
        self.with_level(index, |level| level.name = name)
    }

    /// Replace the colour token of the level at `index`.
    pub fn recolor_level(&self, index: usize, color: impl Into<String>) -> RubricResult<Self> {
        let color = color.into();
        self.with_level(index, |level| level.color = color)
    }

    /// Replace the description of the level at `index`.
    pub fn describe_level(
        &self,
        index: usize,
        description: impl Into<String>,
    ) -> RubricResult<Self> {
        let description = description.into();
        self.with_level(index, |level| level.description = description)
    }

    /// Replace the rubric name.
    pub fn rename_rubric(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.name = name.into();
        next
    }

    fn with_level(&self, index: usize, edit: impl FnOnce(&mut Level)) -> RubricResult<Self> {
        self.check_level(index)?;
        let mut next = self.clone();
        edit(&mut next.levels[index].level);
        Ok(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/fields.rs"]
mod tests;
