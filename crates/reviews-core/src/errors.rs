//! Cross-cutting error types for the reviews workspace.
//!
//! Storage errors (`DatabaseError`) and configuration errors (`ConfigError`)
//! live in their own crates and wrap these.

use thiserror::Error;

/// A review failed one of the configured constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Score {score} is outside the allowed range {min}..={max}")]
    ScoreOutOfRange { score: i64, min: i64, max: i64 },

    #[error("Score {score} is not one of the configured choices")]
    ScoreNotAChoice { score: i64 },

    #[error("Comment is {length} characters long, the maximum is {max}")]
    CommentTooLong { length: usize, max: usize },

    #[error("A comment is required")]
    CommentRequired,
}

/// Errors that can be raised by any reviews crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A review failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A content type identifier is not of the form `app_label.model`.
    #[error("Invalid content type '{0}': expected 'app_label.model'")]
    InvalidContentType(String),

    /// The entity type is not listed as reviewable in configuration.
    #[error("Content type '{content_type}' is not configured as reviewable")]
    NotReviewable { content_type: String },
}
