//! The reviewable capability and the registry of reviewable types.
//!
//! A host entity type opts into reviews by implementing [`Reviewable`] and
//! registering itself with the service. Registration is only accepted for
//! content types listed in `ReviewRules::reviewable_models`; the registry then
//! knows which host table resolves a [`TargetRef`] of that type.
//!
//! The storage layer does not enforce the list: a review may be stored
//! against any well-formed content type.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;

use reviews_core::{ContentType, CoreError, Review, TargetRef};

use crate::error::DatabaseError;
use crate::service::ReviewService;

/// An entity type that can be the target of reviews.
///
/// ```no_run
/// use reviews_db::Reviewable;
///
/// struct Product {
///     id: i64,
///     name: String,
/// }
///
/// impl Reviewable for Product {
///     const CONTENT_TYPE: &'static str = "shop.product";
///     const TABLE: &'static str = "products";
///
///     fn object_id(&self) -> String {
///         self.id.to_string()
///     }
/// }
/// ```
pub trait Reviewable {
    /// `app_label.model` identifier stored on each review.
    const CONTENT_TYPE: &'static str;
    /// Host table holding rows of this type.
    const TABLE: &'static str;
    /// Primary key column of [`Self::TABLE`].
    const ID_COLUMN: &'static str = "id";

    /// Primary key of this instance, as stored in `reviews.object_id`.
    fn object_id(&self) -> String;

    /// Parsed [`Self::CONTENT_TYPE`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidContentType` if the constant is malformed.
    fn content_type() -> Result<ContentType, CoreError> {
        Self::CONTENT_TYPE.parse()
    }

    /// Generic reference to this instance.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidContentType` if the constant is malformed.
    fn target(&self) -> Result<TargetRef, CoreError> {
        Ok(TargetRef::new(Self::content_type()?, self.object_id()))
    }

    /// Mean score of this instance's reviews, rounded per the service rules.
    /// `None` when there are no reviews.
    fn average_score(
        &self,
        svc: &ReviewService,
    ) -> impl Future<Output = Result<Option<f64>, DatabaseError>> {
        async move { svc.average_score(&self.target()?).await }
    }

    /// Reviews pointing at this instance, newest first.
    fn reviews(
        &self,
        svc: &ReviewService,
    ) -> impl Future<Output = Result<Vec<Review>, DatabaseError>> {
        async move { svc.reviews_for(&self.target()?).await }
    }

    /// Number of reviews pointing at this instance.
    fn review_count(
        &self,
        svc: &ReviewService,
    ) -> impl Future<Output = Result<u64, DatabaseError>> {
        async move { svc.review_count(&self.target()?).await }
    }
}

/// Where rows of a registered reviewable type live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetTable {
    pub table: &'static str,
    pub id_column: &'static str,
}

/// Configured reviewable content types and the tables that resolve them.
#[derive(Debug, Clone, Default)]
pub struct ReviewableRegistry {
    listed: BTreeSet<ContentType>,
    tables: BTreeMap<ContentType, TargetTable>,
}

impl ReviewableRegistry {
    /// Build a registry that accepts the given content types.
    pub fn new(listed: impl IntoIterator<Item = ContentType>) -> Self {
        Self {
            listed: listed.into_iter().collect(),
            tables: BTreeMap::new(),
        }
    }

    /// Register `T` so its targets can be resolved.
    ///
    /// Registering the same type twice replaces the earlier table mapping.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidContentType` if `T::CONTENT_TYPE` is malformed,
    /// or `CoreError::NotReviewable` if it is not listed in configuration.
    pub fn register<T: Reviewable>(&mut self) -> Result<(), CoreError> {
        let content_type = T::content_type()?;
        if !self.listed.contains(&content_type) {
            return Err(CoreError::NotReviewable {
                content_type: content_type.to_string(),
            });
        }
        tracing::debug!(%content_type, table = T::TABLE, "registered reviewable type");
        self.tables.insert(
            content_type,
            TargetTable {
                table: T::TABLE,
                id_column: T::ID_COLUMN,
            },
        );
        Ok(())
    }

    /// Whether the content type is listed as reviewable.
    #[must_use]
    pub fn is_reviewable(&self, content_type: &ContentType) -> bool {
        self.listed.contains(content_type)
    }

    /// Host table for a registered content type.
    #[must_use]
    pub fn table_for(&self, content_type: &ContentType) -> Option<TargetTable> {
        self.tables.get(content_type).copied()
    }

    /// Registered content types with their tables.
    pub fn registered(&self) -> impl Iterator<Item = (&ContentType, TargetTable)> {
        self.tables.iter().map(|(ct, table)| (ct, *table))
    }

    /// `(verbose name, title)` pairs for every listed content type, in
    /// identifier order. Suitable as filter choices in a moderation UI.
    #[must_use]
    pub fn reviewable_models(&self) -> Vec<(String, String)> {
        self.listed
            .iter()
            .map(|ct| (ct.verbose_name(), ct.title()))
            .collect()
    }

    /// Choices for a "reviewed model" filter. `None` with fewer than two
    /// listed types, where the filter has nothing to narrow.
    #[must_use]
    pub fn model_filter_choices(&self) -> Option<Vec<(String, String)>> {
        (self.listed.len() >= 2).then(|| self.reviewable_models())
    }
}
