//! Repository modules implementing review operations.
//!
//! Each module adds methods to `ReviewService` via `impl ReviewService` blocks.

pub mod aggregate;
pub mod review;
pub mod target;
