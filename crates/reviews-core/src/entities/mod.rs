//! Entity structs for review domain objects.
//!
//! Each entity maps to a table in the libSQL database (see
//! `reviews-db/migrations`). All structs derive `Serialize`, `Deserialize`, and
//! `JsonSchema`.

mod review;

pub use review::Review;
