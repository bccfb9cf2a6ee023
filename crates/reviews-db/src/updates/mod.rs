//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. `Some` fields
//! are applied to the loaded entity, which is then re-saved in full.

pub mod review;
