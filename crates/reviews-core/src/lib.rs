//! # reviews-core
//!
//! Core types, validation rules, and error types for the reviews workspace.
//!
//! This crate provides the foundational types shared across all reviews crates:
//! - The `Review` entity and its recency check
//! - Content types and generic target references
//! - Normalized review rules (score bounds, choices, comment constraints)
//! - ID prefix constants
//! - Cross-cutting error types

pub mod content_type;
pub mod entities;
pub mod errors;
pub mod ids;
pub mod rules;

pub use content_type::{ContentType, TargetRef};
pub use entities::Review;
pub use errors::{CoreError, ValidationError};
pub use rules::{ReviewRules, ScoreChoice};
