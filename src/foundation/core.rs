use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{RubricError, RubricResult};

pub use kurbo::{Point, Rect};

/// Upper end of the score range as a real number.
pub const SCORE_MAX: f64 = 10.0;

/// Round a real number to the nearest point of the half-unit grid.
///
/// Ties round towards positive infinity, so `0.25` becomes `0.5` and `-0.25` becomes `0.0`.
pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0 + 0.5).floor() / 2.0
}

/// A score in the closed range `[0, 10]`, held exactly on the half-unit grid.
///
/// Internally a count of half-units (`0..=20`), so ordering, equality and arithmetic on
/// boundaries never suffer from floating point drift. On the wire it is a plain JSON number.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(u8);

impl Score {
    const MAX_HALF_STEPS: u8 = 20;

    /// Lower end of the score range (`0.0`).
    pub const MIN: Score = Score(0);
    /// Upper end of the score range (`10.0`).
    pub const MAX: Score = Score(Self::MAX_HALF_STEPS);
    /// Smallest allowed distance between two adjacent boundaries (`0.5`).
    pub const STEP: Score = Score(1);

    /// Build a score from a count of half-units (`0..=20`).
    pub fn from_half_steps(half_steps: u8) -> RubricResult<Self> {
        if half_steps > Self::MAX_HALF_STEPS {
            return Err(RubricError::validation(format!(
                "score of {half_steps} half-steps exceeds the maximum of {}",
                Self::MAX_HALF_STEPS
            )));
        }
        Ok(Self(half_steps))
    }

    /// Number of half-units above zero.
    pub const fn half_steps(self) -> u8 {
        self.0
    }

    /// Score as a real number.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) * 0.5
    }

    /// Quantize an arbitrary real number: round to the half-unit grid, then clamp into `[0, 10]`.
    ///
    /// `NaN` maps to [`Score::MIN`].
    pub fn quantize(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        let half_steps = (round_to_half(value) * 2.0).clamp(0.0, f64::from(Self::MAX_HALF_STEPS));
        Self(half_steps as u8)
    }

    /// Parse an exact grid value. Off-grid, out-of-range and non-finite values are rejected.
    pub fn try_from_f64(value: f64) -> RubricResult<Self> {
        if !value.is_finite() {
            return Err(RubricError::validation(format!(
                "score must be finite, got {value}"
            )));
        }
        if !(0.0..=SCORE_MAX).contains(&value) {
            return Err(RubricError::validation(format!(
                "score must be within [0, 10], got {value}"
            )));
        }
        let doubled = value * 2.0;
        if doubled.fract() != 0.0 {
            return Err(RubricError::validation(format!(
                "score must lie on the half-unit grid, got {value}"
            )));
        }
        Ok(Self(doubled as u8))
    }

    /// Quantized midpoint between two scores.
    pub fn midpoint(self, other: Score) -> Score {
        // (a + b) / 2 in half-units, rounded half-up to match `round_to_half`.
        Score((self.0 + other.0).div_ceil(2))
    }

    /// Distance to `upper` in half-units, zero when `upper` is not above `self`.
    pub fn steps_to(self, upper: Score) -> u8 {
        upper.0.saturating_sub(self.0)
    }

    /// One grid step up, saturating at [`Score::MAX`].
    pub fn step_up(self) -> Score {
        Score((self.0 + 1).min(Self::MAX_HALF_STEPS))
    }

    /// One grid step down, saturating at [`Score::MIN`].
    pub fn step_down(self) -> Score {
        Score(self.0.saturating_sub(1))
    }

    /// Shift up by a number of half-units, saturating at [`Score::MAX`].
    pub fn add_steps(self, steps: u8) -> Score {
        Score(self.0.saturating_add(steps).min(Self::MAX_HALF_STEPS))
    }
}

impl TryFrom<f64> for Score {
    type Error = RubricError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_from_f64(value)
    }
}

impl From<Score> for f64 {
    fn from(value: Score) -> Self {
        value.as_f64()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.as_f64())
    }
}

/// Name of one evaluated skill. Owned by the host; the editor treats it as an opaque key.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct SkillName(String);

impl SkillName {
    /// Wrap a skill name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SkillName {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for SkillName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SkillName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fixed, externally supplied ordering of skills. Column `i` of the matrix is skill `i`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<SkillName>", into = "Vec<SkillName>")]
pub struct SkillCatalog {
    skills: Vec<SkillName>,
}

const VOLLEYBALL_SKILLS: [&str; 7] = [
    "Serving",
    "Passing",
    "Setting",
    "Attacking",
    "Blocking",
    "Digging",
    "Court Awareness",
];

impl SkillCatalog {
    /// Build a catalog, rejecting empty lists, blank names and duplicates.
    pub fn new(skills: impl IntoIterator<Item = SkillName>) -> RubricResult<Self> {
        let skills: Vec<SkillName> = skills.into_iter().collect();
        if skills.is_empty() {
            return Err(RubricError::validation(
                "skill catalog must contain at least one skill",
            ));
        }
        for (idx, skill) in skills.iter().enumerate() {
            if skill.as_str().trim().is_empty() {
                return Err(RubricError::validation(format!(
                    "skill catalog entry {idx} is blank"
                )));
            }
            if skills[..idx].contains(skill) {
                return Err(RubricError::validation(format!(
                    "skill '{skill}' appears more than once in the catalog"
                )));
            }
        }
        Ok(Self { skills })
    }

    /// Number of skills.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Always false for a constructed catalog; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skill at a column index.
    pub fn get(&self, idx: usize) -> Option<&SkillName> {
        self.skills.get(idx)
    }

    /// Column index of a skill.
    pub fn index_of(&self, skill: &SkillName) -> Option<usize> {
        self.skills.iter().position(|s| s == skill)
    }

    /// Skills in column order.
    pub fn iter(&self) -> std::slice::Iter<'_, SkillName> {
        self.skills.iter()
    }

    /// Skills in column order, as a slice.
    pub fn as_slice(&self) -> &[SkillName] {
        &self.skills
    }
}

impl TryFrom<Vec<SkillName>> for SkillCatalog {
    type Error = RubricError;

    fn try_from(skills: Vec<SkillName>) -> Result<Self, Self::Error> {
        Self::new(skills)
    }
}

impl From<SkillCatalog> for Vec<SkillName> {
    fn from(catalog: SkillCatalog) -> Self {
        catalog.skills
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self {
            skills: VOLLEYBALL_SKILLS
                .iter()
                .map(|s| SkillName::from(*s))
                .collect(),
        }
    }
}

impl FromStr for SkillCatalog {
    type Err = RubricError;

    /// Parse a comma-separated list, e.g. `"Serving, Passing"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(SkillName::from),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
