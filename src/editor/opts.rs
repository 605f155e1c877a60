use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::editor::palette::{COLOR_PALETTE, FALLBACK_COLOR};
use crate::foundation::error::{RubricError, RubricResult};

/// Host-tunable editor defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorOpts {
    /// Colours offered for levels; new levels take the next unused one.
    pub palette: Vec<String>,
    /// Name given to a freshly added level.
    pub new_level_name: String,
    /// Description given to a freshly added level.
    pub new_level_description: String,
    /// Colour used when a persisted band has none.
    pub fallback_color: String,
}

impl Default for EditorOpts {
    fn default() -> Self {
        Self {
            palette: COLOR_PALETTE.iter().map(|c| (*c).to_owned()).collect(),
            new_level_name: "New Level".to_owned(),
            new_level_description: String::new(),
            fallback_color: FALLBACK_COLOR.to_owned(),
        }
    }
}

impl EditorOpts {
    /// Load options from a JSON file; missing fields take their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> RubricResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RubricError::serde(format!("open editor options '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| RubricError::serde(format!("parse editor options JSON: {e}")))
    }
}
