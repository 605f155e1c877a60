use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::SkillName;
use crate::foundation::error::{RubricError, RubricResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A persisted club skill matrix, as stored and served by the host.
///
/// This is the JSON-facing representation: every skill carries its own full list of bands.
/// The editor works on [`crate::EditorState`] instead; see [`crate::decode`] and
/// [`crate::encode`] for the conversion.
pub struct SkillMatrix {
    /// Opaque identifier assigned by the host.
    pub id: String,
    /// Display name of the rubric.
    pub name: String,
    /// Per-skill band lists.
    pub skills: Vec<SkillBands>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Ordered bands for one skill.
pub struct SkillBands {
    /// Skill these bands belong to.
    pub skill: SkillName,
    /// Bands, in any order; `order` defines the sequence.
    pub bands: Vec<Band>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One level as seen by one skill: a concrete score interval plus that skill's criteria.
pub struct Band {
    /// 1-based position of the band.
    pub order: u32,
    /// Inclusive lower bound.
    pub min_score: f64,
    /// Upper bound; `10` for the final band.
    pub max_score: f64,
    /// Level name.
    pub label: String,
    /// What qualifies a player for this band on this skill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<String>,
    /// Level colour token (e.g. `#22c55e`).
    #[serde(default)]
    pub color: String,
    /// Level description shared by every skill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Full-replace update submitted on save.
pub struct UpdateSkillMatrixRequest {
    /// New rubric name.
    pub name: String,
    /// Complete per-skill band lists.
    pub skills: Vec<SkillBands>,
}

impl SkillMatrix {
    /// Parse a skill matrix from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> RubricResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RubricError::serde(format!("parse skill matrix JSON: {e}")))
    }

    /// Parse a skill matrix from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RubricResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RubricError::serde(format!("open skill matrix JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> RubricResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RubricError::serde(format!("write skill matrix JSON: {e}")))
    }

    /// Check the shape of the persisted data.
    ///
    /// This covers what can be judged without building an editor state: at least one skill,
    /// no duplicate skills, at least one band per skill, unique `order` values, and finite scores
    /// inside `[0, 10]` with `min <= max`.
    pub fn validate(&self) -> RubricResult<()> {
        if self.skills.is_empty() {
            return Err(RubricError::malformed("skill matrix has no skills"));
        }
        let mut seen = BTreeSet::new();
        for skill in &self.skills {
            if !seen.insert(&skill.skill) {
                return Err(RubricError::malformed(format!(
                    "skill '{}' appears more than once",
                    skill.skill
                )));
            }
            skill.validate()?;
        }
        Ok(())
    }

    /// Apply a full-replace update, keeping the matrix identity.
    pub fn with_update(self, request: UpdateSkillMatrixRequest) -> Self {
        Self {
            id: self.id,
            name: request.name,
            skills: request.skills,
        }
    }
}

impl SkillBands {
    /// Bands sorted by their stored `order`.
    pub fn sorted_bands(&self) -> Vec<&Band> {
        let mut sorted: Vec<&Band> = self.bands.iter().collect();
        sorted.sort_by_key(|b| b.order);
        sorted
    }

    fn validate(&self) -> RubricResult<()> {
        if self.bands.is_empty() {
            return Err(RubricError::malformed(format!(
                "skill '{}' has no bands",
                self.skill
            )));
        }
        let mut orders = BTreeSet::new();
        for band in &self.bands {
            if !orders.insert(band.order) {
                return Err(RubricError::malformed(format!(
                    "skill '{}' has two bands with order {}",
                    self.skill, band.order
                )));
            }
            for (field, v) in [("minScore", band.min_score), ("maxScore", band.max_score)] {
                if !v.is_finite() || !(0.0..=10.0).contains(&v) {
                    return Err(RubricError::malformed(format!(
                        "skill '{}' band '{}' {field} must be finite and within [0, 10]",
                        self.skill, band.label
                    )));
                }
            }
            if band.min_score > band.max_score {
                return Err(RubricError::malformed(format!(
                    "skill '{}' band '{}' has minScore > maxScore",
                    self.skill, band.label
                )));
            }
        }
        Ok(())
    }
}

impl UpdateSkillMatrixRequest {
    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> RubricResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RubricError::serde(format!("write update request JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rubric/model.rs"]
mod tests;
