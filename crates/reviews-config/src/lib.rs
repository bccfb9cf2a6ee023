//! # reviews-config
//!
//! Layered configuration loading for reviews using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`REVIEWS_*` prefix, `__` as separator)
//! 2. Project-level `.reviews/config.toml`
//! 3. User-level `~/.config/reviews/config.toml`
//! 4. Built-in defaults
//!
//! Absent configuration is never an error: every option has a default.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `REVIEWS_SCORE__MAX` -> `score.max`,
//! `REVIEWS_COMMENT__APPROVAL_REQUIRED` -> `comment.approval_required`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use reviews_config::ReviewsConfig;
//!
//! let config = ReviewsConfig::load_with_dotenv().expect("config");
//! let rules = config.rules().expect("valid rules");
//! assert!(rules.score_min <= rules.score_max);
//! ```

mod comment;
mod database;
mod error;
mod general;
mod score;

pub use comment::CommentConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use score::ScoreConfig;

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::TimeDelta;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use reviews_core::{ContentType, ReviewRules};
use serde::{Deserialize, Serialize};

/// Largest digit count accepted for average-score rounding.
const MAX_AVERAGE_SCORE_DIGITS: u8 = 15;

/// Widest allowed `score.max - score.min`. Derived choices hold one entry per value.
pub const MAX_SCORE_SPAN: i64 = 100;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReviewsConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub score: ScoreConfig,
    #[serde(default)]
    pub comment: CommentConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl ReviewsConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source holds a value of the wrong shape.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the workspace root.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".reviews/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("REVIEWS_").split("__"))
    }

    /// Validate the loaded values and convert them into [`ReviewRules`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when bounds are inverted or wider
    /// than [`MAX_SCORE_SPAN`], explicit choices are empty, duplicated, or out
    /// of bounds, a model identifier is not `app_label.model`, or a numeric
    /// option is out of range.
    pub fn rules(&self) -> Result<ReviewRules, ConfigError> {
        let score = &self.score;
        if score.min > score.max {
            return Err(ConfigError::invalid(
                "score.min",
                format!("min ({}) is greater than max ({})", score.min, score.max),
            ));
        }
        if score
            .max
            .checked_sub(score.min)
            .is_none_or(|span| span > MAX_SCORE_SPAN)
        {
            return Err(ConfigError::invalid(
                "score.max",
                format!(
                    "range {}..={} is wider than {MAX_SCORE_SPAN}",
                    score.min, score.max
                ),
            ));
        }

        if let Some(choices) = &score.choices {
            if choices.is_empty() {
                return Err(ConfigError::invalid(
                    "score.choices",
                    "explicit choice list is empty",
                ));
            }
            let mut seen = BTreeSet::new();
            for choice in choices {
                if !(score.min..=score.max).contains(&choice.value) {
                    return Err(ConfigError::invalid(
                        "score.choices",
                        format!(
                            "choice {} is outside {}..={}",
                            choice.value, score.min, score.max
                        ),
                    ));
                }
                if !seen.insert(choice.value) {
                    return Err(ConfigError::invalid(
                        "score.choices",
                        format!("choice {} is listed twice", choice.value),
                    ));
                }
            }
        }

        if self.comment.required && self.comment.max_length == 0 {
            return Err(ConfigError::invalid(
                "comment.max_length",
                "must be positive when comments are required",
            ));
        }

        if self.general.average_score_digits > MAX_AVERAGE_SCORE_DIGITS {
            return Err(ConfigError::invalid(
                "general.average_score_digits",
                format!("must be at most {MAX_AVERAGE_SCORE_DIGITS}"),
            ));
        }

        let update_threshold = i64::try_from(self.general.update_threshold_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| {
                ConfigError::invalid("general.update_threshold_secs", "value is too large")
            })?;

        let reviewable_models = self
            .general
            .reviewable_models
            .iter()
            .map(|model| {
                model.parse::<ContentType>().map_err(|e| {
                    ConfigError::invalid("general.reviewable_models", e.to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReviewRules {
            reviewable_models,
            score_min: score.min,
            score_max: score.max,
            score_choices: score.choices.clone(),
            comment_max_length: self.comment.max_length,
            comment_required: self.comment.required,
            comment_approval_required: self.comment.approval_required,
            update_threshold,
            average_score_digits: self.general.average_score_digits,
        })
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reviews").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if set) looking for a `.env` file,
    /// then falls back to the current directory. Silently does nothing if none
    /// is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
