//! Normalized review rules.
//!
//! `ReviewRules` is the validated form of the deployment configuration. It is
//! built once (by `reviews-config`, or via `Default`) and threaded through
//! every validation and computation call.

use chrono::TimeDelta;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::content_type::ContentType;
use crate::errors::ValidationError;

pub const DEFAULT_SCORE_MIN: i64 = 1;
pub const DEFAULT_SCORE_MAX: i64 = 5;
pub const DEFAULT_COMMENT_MAX_LENGTH: usize = 1000;
pub const DEFAULT_UPDATE_THRESHOLD_SECS: i64 = 10;
pub const DEFAULT_AVERAGE_SCORE_DIGITS: u8 = 2;

/// One selectable score with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreChoice {
    pub value: i64,
    pub label: String,
}

impl ScoreChoice {
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Limits applied to reviews and review aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRules {
    /// Entity types allowed to act as review targets.
    pub reviewable_models: Vec<ContentType>,
    /// Inclusive lower score bound.
    pub score_min: i64,
    /// Inclusive upper score bound.
    pub score_max: i64,
    /// Explicit score choices. `None` derives one choice per value in bounds.
    pub score_choices: Option<Vec<ScoreChoice>>,
    /// Maximum comment length in characters.
    pub comment_max_length: usize,
    pub comment_required: bool,
    /// New reviews start unapproved when set.
    pub comment_approval_required: bool,
    /// Minimum gap between `created_at` and `updated_at` that counts as an edit.
    pub update_threshold: TimeDelta,
    /// Digits kept after the decimal point in average scores.
    pub average_score_digits: u8,
}

impl Default for ReviewRules {
    fn default() -> Self {
        Self {
            reviewable_models: Vec::new(),
            score_min: DEFAULT_SCORE_MIN,
            score_max: DEFAULT_SCORE_MAX,
            score_choices: None,
            comment_max_length: DEFAULT_COMMENT_MAX_LENGTH,
            comment_required: false,
            comment_approval_required: false,
            update_threshold: TimeDelta::seconds(DEFAULT_UPDATE_THRESHOLD_SECS),
            average_score_digits: DEFAULT_AVERAGE_SCORE_DIGITS,
        }
    }
}

impl ReviewRules {
    /// The selectable scores, explicit or derived from the bounds.
    ///
    /// Derived choices hold one entry per value, so the bounds must stay narrow;
    /// `ReviewsConfig::rules` caps the span.
    #[must_use]
    pub fn score_choices(&self) -> Vec<ScoreChoice> {
        self.score_choices.clone().unwrap_or_else(|| {
            (self.score_min..=self.score_max)
                .map(|value| ScoreChoice::new(value, value.to_string()))
                .collect()
        })
    }

    /// Check a score against the bounds and, when configured, the explicit choices.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ScoreOutOfRange` or `ValidationError::ScoreNotAChoice`.
    pub fn validate_score(&self, score: i64) -> Result<(), ValidationError> {
        if !(self.score_min..=self.score_max).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange {
                score,
                min: self.score_min,
                max: self.score_max,
            });
        }
        if let Some(choices) = &self.score_choices {
            if !choices.iter().any(|c| c.value == score) {
                return Err(ValidationError::ScoreNotAChoice { score });
            }
        }
        Ok(())
    }

    /// Check a comment against the length limit and the required flag.
    ///
    /// Length is counted in characters, not bytes. A whitespace-only comment
    /// counts as missing.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::CommentRequired` or `ValidationError::CommentTooLong`.
    pub fn validate_comment(&self, comment: &str) -> Result<(), ValidationError> {
        if self.comment_required && comment.trim().is_empty() {
            return Err(ValidationError::CommentRequired);
        }
        let length = comment.chars().count();
        if length > self.comment_max_length {
            return Err(ValidationError::CommentTooLong {
                length,
                max: self.comment_max_length,
            });
        }
        Ok(())
    }

    /// Validate every constrained field of a review.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered, score first.
    pub fn validate(&self, score: i64, comment: &str) -> Result<(), ValidationError> {
        self.validate_score(score)?;
        self.validate_comment(comment)
    }

    /// Approval state given to a new review when the caller doesn't choose one.
    #[must_use]
    pub const fn default_comment_approved(&self) -> bool {
        !self.comment_approval_required
    }

    /// Round an average score to the configured digit count (half away from zero).
    #[must_use]
    pub fn round_average(&self, average: f64) -> f64 {
        let factor = 10_f64.powi(i32::from(self.average_score_digits));
        (average * factor).round() / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn defaults() {
        let rules = ReviewRules::default();
        assert_eq!(rules.score_min, 1);
        assert_eq!(rules.score_max, 5);
        assert_eq!(rules.comment_max_length, 1000);
        assert!(!rules.comment_required);
        assert!(!rules.comment_approval_required);
        assert_eq!(rules.update_threshold, TimeDelta::seconds(10));
        assert_eq!(rules.average_score_digits, 2);
        assert!(rules.reviewable_models.is_empty());
    }

    #[test]
    fn derived_choices_follow_bounds() {
        let rules = ReviewRules {
            score_min: 0,
            score_max: 3,
            ..Default::default()
        };
        let values: Vec<i64> = rules.score_choices().iter().map(|c| c.value).collect();
        assert_eq!(values, vec![0, 1, 2, 3]);
        assert_eq!(rules.score_choices()[2].label, "2");
    }

    #[test]
    fn explicit_choices_win() {
        let choices = vec![ScoreChoice::new(1, "Bad"), ScoreChoice::new(5, "Great")];
        let rules = ReviewRules {
            score_choices: Some(choices.clone()),
            ..Default::default()
        };
        assert_eq!(rules.score_choices(), choices);
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn scores_in_bounds_pass(#[case] score: i64) {
        assert_eq!(ReviewRules::default().validate_score(score), Ok(()));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    fn scores_out_of_bounds_fail(#[case] score: i64) {
        assert_eq!(
            ReviewRules::default().validate_score(score),
            Err(ValidationError::ScoreOutOfRange {
                score,
                min: 1,
                max: 5
            })
        );
    }

    #[test]
    fn score_in_bounds_but_not_a_choice_fails() {
        let rules = ReviewRules {
            score_choices: Some(vec![ScoreChoice::new(1, "Bad"), ScoreChoice::new(5, "Great")]),
            ..Default::default()
        };
        assert_eq!(
            rules.validate_score(3),
            Err(ValidationError::ScoreNotAChoice { score: 3 })
        );
        assert_eq!(rules.validate_score(5), Ok(()));
    }

    #[test]
    fn comment_at_max_length_passes_and_one_over_fails() {
        let rules = ReviewRules {
            comment_max_length: 10,
            ..Default::default()
        };
        assert_eq!(rules.validate_comment(&"a".repeat(10)), Ok(()));
        assert_eq!(
            rules.validate_comment(&"a".repeat(11)),
            Err(ValidationError::CommentTooLong {
                length: 11,
                max: 10
            })
        );
    }

    #[test]
    fn comment_length_counts_characters() {
        let rules = ReviewRules {
            comment_max_length: 3,
            ..Default::default()
        };
        assert_eq!(rules.validate_comment("äöü"), Ok(()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn required_comment_must_be_present(#[case] comment: &str) {
        let rules = ReviewRules {
            comment_required: true,
            ..Default::default()
        };
        assert_eq!(
            rules.validate_comment(comment),
            Err(ValidationError::CommentRequired)
        );
        assert_eq!(ReviewRules::default().validate_comment(comment), Ok(()));
    }

    #[test]
    fn validate_checks_score_first() {
        let rules = ReviewRules {
            comment_required: true,
            ..Default::default()
        };
        assert!(matches!(
            rules.validate(9, ""),
            Err(ValidationError::ScoreOutOfRange { .. })
        ));
    }

    #[test]
    fn approval_default_follows_flag() {
        assert!(ReviewRules::default().default_comment_approved());
        let rules = ReviewRules {
            comment_approval_required: true,
            ..Default::default()
        };
        assert!(!rules.default_comment_approved());
    }

    #[rstest]
    #[case(2, 3.5, 3.5)]
    #[case(2, 11.0 / 3.0, 3.67)]
    #[case(0, 3.5, 4.0)]
    #[case(1, 4.25, 4.3)]
    #[case(2, 25.0 / 8.0, 3.13)]
    #[case(2, 2.5, 2.5)]
    #[case(0, 2.5, 3.0)]
    fn rounds_average(#[case] digits: u8, #[case] average: f64, #[case] expected: f64) {
        let rules = ReviewRules {
            average_score_digits: digits,
            ..Default::default()
        };
        assert!((rules.round_average(average) - expected).abs() < 1e-9);
    }
}
