//! Service layer holding the database, the review rules, and the registry.
//!
//! `ReviewService` wraps `ReviewDb` (raw database access) together with the
//! `ReviewRules` every mutation is validated against. All repo methods are
//! implemented as `impl ReviewService` blocks in `crate::repos`.

use reviews_config::ReviewsConfig;
use reviews_core::ReviewRules;

use crate::ReviewDb;
use crate::error::DatabaseError;
use crate::reviewable::{Reviewable, ReviewableRegistry};

/// Review storage plus the rules and registry it is configured with.
///
/// Rules are fixed at construction; build a new service to change them.
pub struct ReviewService {
    db: ReviewDb,
    rules: ReviewRules,
    registry: ReviewableRegistry,
}

impl ReviewService {
    /// Create a service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path`: Path to the libSQL database file, or `":memory:"` for tests.
    /// * `rules`: Validation and aggregation rules.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, rules: ReviewRules) -> Result<Self, DatabaseError> {
        let db = ReviewDb::open_local(db_path).await?;
        Ok(Self::from_db(db, rules))
    }

    /// Create a service from loaded configuration, using `database.path`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Config` if the configuration holds invalid
    /// values, or `DatabaseError` if the database cannot be opened.
    pub async fn from_config(config: &ReviewsConfig) -> Result<Self, DatabaseError> {
        let rules = config.rules()?;
        Self::new_local(&config.database.path, rules).await
    }

    /// Create from an existing `ReviewDb`.
    #[must_use]
    pub fn from_db(db: ReviewDb, rules: ReviewRules) -> Self {
        let registry = ReviewableRegistry::new(rules.reviewable_models.iter().cloned());
        Self {
            db,
            rules,
            registry,
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &ReviewDb {
        &self.db
    }

    #[must_use]
    pub const fn rules(&self) -> &ReviewRules {
        &self.rules
    }

    #[must_use]
    pub const fn registry(&self) -> &ReviewableRegistry {
        &self.registry
    }

    /// Register a host entity type as a review target.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` if the type's content type is malformed or
    /// not listed in `reviewable_models`.
    pub fn register_reviewable<T: Reviewable>(&mut self) -> Result<(), DatabaseError> {
        self.registry.register::<T>()?;
        Ok(())
    }

    /// `(verbose name, title)` pairs for every configured reviewable type.
    #[must_use]
    pub fn reviewable_models(&self) -> Vec<(String, String)> {
        self.registry.reviewable_models()
    }

    /// Reviewed-model filter choices, `None` unless two or more types are listed.
    #[must_use]
    pub fn model_filter_choices(&self) -> Option<Vec<(String, String)>> {
        self.registry.model_filter_choices()
    }
}
