//! ID prefix constants.
//!
//! IDs are generated by the database layer as `{prefix}-{8 hex chars}`.

/// Prefix for review IDs, e.g. `rev-a3f8b2c1`.
pub const PREFIX_REVIEW: &str = "rev";

pub const ALL_PREFIXES: &[&str] = &[PREFIX_REVIEW];
