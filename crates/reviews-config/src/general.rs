//! General review configuration.

use serde::{Deserialize, Serialize};

/// Default edit-detection window in seconds.
const fn default_update_threshold_secs() -> u64 {
    10
}

/// Default digits kept in average scores.
const fn default_average_score_digits() -> u8 {
    2
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Entity types (`app_label.model`) that may be registered as reviewable.
    #[serde(default)]
    pub reviewable_models: Vec<String>,

    /// A save this many seconds after creation counts as an edit.
    #[serde(default = "default_update_threshold_secs")]
    pub update_threshold_secs: u64,

    /// Digits kept after the decimal point when averaging scores.
    #[serde(default = "default_average_score_digits")]
    pub average_score_digits: u8,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            reviewable_models: Vec::new(),
            update_threshold_secs: default_update_threshold_secs(),
            average_score_digits: default_average_score_digits(),
        }
    }
}
