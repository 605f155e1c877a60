//! The rubric a club starts from before editing anything.

use crate::editor::opts::EditorOpts;
use crate::editor::state::EditorState;
use crate::editor::transcode::decode;
use crate::foundation::core::{SCORE_MAX, Score, SkillCatalog};
use crate::foundation::error::{RubricError, RubricResult};
use crate::rubric::model::{Band, SkillBands, SkillMatrix};

/// Level names of the default rubric, lowest first.
pub const DEFAULT_LEVELS: [(&str, &str); 5] = [
    ("Beginner", "Learning the basic movement"),
    ("Developing", "Performs the skill with guidance"),
    ("Intermediate", "Reliable in drills, inconsistent in games"),
    ("Advanced", "Reliable under game pressure"),
    ("Elite", "Sets the standard for the team"),
];

/// Anchors that split `[0, 10]` into `levels` bands of near-equal width.
///
/// Each anchor is `10 * i / levels` snapped to the half grid. At most 20 levels fit.
pub fn evenly_spaced_anchors(levels: usize) -> RubricResult<Vec<Score>> {
    let max_levels = usize::from(Score::MAX.half_steps());
    if !(2..=max_levels).contains(&levels) {
        return Err(RubricError::validation(format!(
            "an evenly spaced rubric needs between 2 and {max_levels} levels, got {levels}"
        )));
    }
    Ok((1..levels)
        .map(|i| Score::quantize(SCORE_MAX * i as f64 / levels as f64))
        .collect())
}

/// Build the five-level starting rubric for every skill in `catalog`.
///
/// Every skill gets the same evenly spaced bands and no criteria. Colours are taken from the
/// front of `opts.palette`.
pub fn default_matrix(
    id: impl Into<String>,
    name: impl Into<String>,
    catalog: &SkillCatalog,
    opts: &EditorOpts,
) -> RubricResult<SkillMatrix> {
    let anchors = evenly_spaced_anchors(DEFAULT_LEVELS.len())?;
    let bands: Vec<Band> = DEFAULT_LEVELS
        .iter()
        .enumerate()
        .map(|(i, (label, description))| Band {
            order: u32::try_from(i + 1).unwrap_or(u32::MAX),
            min_score: i
                .checked_sub(1)
                .map_or(0.0, |prev| anchors[prev].as_f64()),
            max_score: anchors.get(i).map_or(SCORE_MAX, |a| a.as_f64()),
            label: (*label).to_owned(),
            criteria: None,
            color: opts
                .palette
                .get(i)
                .cloned()
                .unwrap_or_else(|| opts.fallback_color.clone()),
            description: Some((*description).to_owned()),
        })
        .collect();

    Ok(SkillMatrix {
        id: id.into(),
        name: name.into(),
        skills: catalog
            .iter()
            .map(|skill| SkillBands {
                skill: skill.clone(),
                bands: bands.clone(),
            })
            .collect(),
    })
}

impl EditorState {
    /// Editor state for the default rubric.
    pub fn from_template(
        name: impl Into<String>,
        catalog: &SkillCatalog,
        opts: &EditorOpts,
    ) -> RubricResult<Self> {
        decode(&default_matrix("", name, catalog, opts)?, catalog, opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rubric/template.rs"]
mod tests;
