//! Score range and choices.

use reviews_core::ScoreChoice;
use serde::{Deserialize, Serialize};

const fn default_min() -> i64 {
    1
}

const fn default_max() -> i64 {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreConfig {
    /// Inclusive lower bound.
    #[serde(default = "default_min")]
    pub min: i64,

    /// Inclusive upper bound.
    #[serde(default = "default_max")]
    pub max: i64,

    /// Explicit choices, e.g. `[{ value = 1, label = "Poor" }]`.
    /// Derived from `min..=max` when absent.
    #[serde(default)]
    pub choices: Option<Vec<ScoreChoice>>,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            choices: None,
        }
    }
}

impl ScoreConfig {
    /// Whether an explicit choice list overrides the derived one.
    pub const fn has_explicit_choices(&self) -> bool {
        self.choices.is_some()
    }
}
