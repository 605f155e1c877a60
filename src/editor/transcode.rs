//! Conversion between the persisted [`SkillMatrix`] and the in-memory [`EditorState`].

use crate::editor::opts::EditorOpts;
use crate::editor::palette::is_hex_color;
use crate::editor::state::{EditorState, Level};
use crate::foundation::core::{Score, SkillCatalog};
use crate::foundation::error::{RubricError, RubricResult};
use crate::rubric::model::{Band, SkillBands, SkillMatrix, UpdateSkillMatrixRequest};

/// Build an editor state from a persisted matrix.
///
/// Levels (name, colour, description) come from the first stored skill's bands in `order`.
/// Each skill contributes its own anchors (every band's `maxScore` except the last) and
/// criteria. Skills are laid out in `catalog` order, whatever order they were stored in.
///
/// Fails when the matrix is structurally unusable: no skills, a skill with no bands, skills
/// with differing band counts, fewer than two bands, skills missing from or unknown to the
/// catalog, or anchors that are off-grid, out of order or closer than 0.5.
#[tracing::instrument(skip_all, fields(id = %matrix.id, skills = matrix.skills.len()))]
pub fn decode(
    matrix: &SkillMatrix,
    catalog: &SkillCatalog,
    opts: &EditorOpts,
) -> RubricResult<EditorState> {
    matrix.validate()?;

    for stored in &matrix.skills {
        if catalog.index_of(&stored.skill).is_none() {
            return Err(RubricError::malformed(format!(
                "skill '{}' is not part of the skill catalog",
                stored.skill
            )));
        }
    }

    let first = matrix
        .skills
        .first()
        .ok_or_else(|| RubricError::malformed("skill matrix has no skills"))?;
    let template = first.sorted_bands();
    if template.len() < 2 {
        return Err(RubricError::malformed(format!(
            "a rubric needs at least two bands, skill '{}' has {}",
            first.skill,
            template.len()
        )));
    }
    let levels: Vec<Level> = template
        .iter()
        .map(|band| level_from_band(band, opts))
        .collect();

    let mut anchors = Vec::with_capacity(catalog.len());
    let mut criteria = Vec::new();
    for (skill_idx, skill) in catalog.iter().enumerate() {
        let stored = matrix
            .skills
            .iter()
            .find(|s| &s.skill == skill)
            .ok_or_else(|| {
                RubricError::malformed(format!("skill '{skill}' is missing from the matrix"))
            })?;
        let bands = stored.sorted_bands();
        if bands.len() != levels.len() {
            return Err(RubricError::malformed(format!(
                "skill '{skill}' has {} bands but skill '{}' has {}",
                bands.len(),
                first.skill,
                levels.len()
            )));
        }
        anchors.push(anchors_from_bands(stored, &bands)?);

        for (level_idx, band) in bands.iter().enumerate() {
            if let Some(text) = &band.criteria {
                criteria.push((skill_idx, level_idx, text.clone()));
            }
        }
    }

    let state = EditorState::from_parts(
        matrix.name.clone(),
        catalog.as_slice().to_vec(),
        levels,
        anchors,
        criteria,
    );
    state
        .validate()
        .map_err(|e| RubricError::malformed(e.to_string()))?;
    tracing::debug!(
        levels = state.level_count(),
        criteria = state.criteria_count(),
        "decoded skill matrix"
    );
    Ok(state)
}

/// Build the full-replace update request for an editor state.
///
/// Every skill gets one band per level: `order` is 1-based, the first band starts at 0, the
/// last ends at 10, and blank descriptions and absent criteria are left out.
#[tracing::instrument(skip_all, fields(levels = state.level_count()))]
pub fn encode(state: &EditorState) -> UpdateSkillMatrixRequest {
    let skills = state
        .skills()
        .iter()
        .enumerate()
        .map(|(skill_idx, skill)| SkillBands {
            skill: skill.clone(),
            bands: state
                .band_views(skill_idx)
                .map(|view| Band {
                    order: u32::try_from(view.index + 1).unwrap_or(u32::MAX),
                    min_score: view.min.as_f64(),
                    max_score: view.max.as_f64(),
                    label: view.level.name.clone(),
                    criteria: view.criteria.map(str::to_owned),
                    color: view.level.color.clone(),
                    description: Some(view.level.description.clone())
                        .filter(|d| !d.is_empty()),
                })
                .collect(),
        })
        .collect();

    UpdateSkillMatrixRequest {
        name: state.name().to_owned(),
        skills,
    }
}

fn level_from_band(band: &Band, opts: &EditorOpts) -> Level {
    let color = if band.color.trim().is_empty() {
        opts.fallback_color.clone()
    } else {
        if !is_hex_color(&band.color) {
            tracing::debug!(
                label = %band.label,
                color = %band.color,
                "non-hex colour token kept as is"
            );
        }
        band.color.clone()
    };
    Level {
        name: band.label.clone(),
        color,
        description: band.description.clone().unwrap_or_default(),
    }
}

fn anchors_from_bands(stored: &SkillBands, bands: &[&Band]) -> RubricResult<Vec<Score>> {
    let mut prev_max = 0.0;
    for band in bands {
        if band.min_score != prev_max {
            tracing::warn!(
                skill = %stored.skill,
                label = %band.label,
                min = band.min_score,
                expected = prev_max,
                "band does not start where the previous one ends; using upper bounds only"
            );
        }
        prev_max = band.max_score;
    }
    if prev_max != 10.0 {
        tracing::warn!(skill = %stored.skill, max = prev_max, "last band does not end at 10");
    }

    bands[..bands.len() - 1]
        .iter()
        .map(|band| {
            Score::try_from_f64(band.max_score).map_err(|e| {
                RubricError::malformed(format!(
                    "skill '{}' band '{}' upper bound: {e}",
                    stored.skill, band.label
                ))
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/editor/transcode.rs"]
mod tests;
