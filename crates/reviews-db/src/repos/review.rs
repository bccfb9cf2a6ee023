//! Review repository: create, read, full save, delete and reverse lookups.
//!
//! Every write goes through validation against the service's `ReviewRules`.
//! There are no partial updates: `update_review` loads the row, applies the
//! change set, and hands the whole review to `save_review`.

use chrono::Utc;
use reviews_core::ids::PREFIX_REVIEW;
use reviews_core::{ContentType, Review, TargetRef};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, parse_content_type, parse_datetime};
use crate::service::ReviewService;
use crate::updates::review::{ReviewUpdate, ReviewUpdateBuilder};

pub(crate) const REVIEW_COLUMNS: &str = "id, content_type, object_id, user_id, score, comment, \
     comment_approved, anonymous, created_at, updated_at";

pub(crate) fn row_to_review(row: &libsql::Row) -> Result<Review, DatabaseError> {
    Ok(Review {
        id: row.get::<String>(0)?,
        target: TargetRef::new(
            parse_content_type(&row.get::<String>(1)?)?,
            row.get::<String>(2)?,
        ),
        user_id: row.get::<String>(3)?,
        score: row.get::<i64>(4)?,
        comment: row.get::<String>(5)?,
        comment_approved: get_bool(row, 6)?,
        anonymous: get_bool(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

pub(crate) async fn collect_reviews(mut rows: libsql::Rows) -> Result<Vec<Review>, DatabaseError> {
    let mut reviews = Vec::new();
    while let Some(row) = rows.next().await? {
        reviews.push(row_to_review(&row)?);
    }
    Ok(reviews)
}

/// Input for [`ReviewService::create_review`].
#[derive(Debug, Clone)]
pub struct NewReview {
    pub target: TargetRef,
    pub user_id: String,
    pub score: i64,
    pub comment: String,
    pub anonymous: bool,
    /// `None` uses the configured default (`!comment_approval_required`).
    pub comment_approved: Option<bool>,
}

impl NewReview {
    pub fn new(target: TargetRef, user_id: impl Into<String>, score: i64) -> Self {
        Self {
            target,
            user_id: user_id.into(),
            score,
            comment: String::new(),
            anonymous: false,
            comment_approved: None,
        }
    }

    #[must_use]
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    #[must_use]
    pub const fn anonymous(mut self, anonymous: bool) -> Self {
        self.anonymous = anonymous;
        self
    }

    #[must_use]
    pub const fn comment_approved(mut self, approved: bool) -> Self {
        self.comment_approved = Some(approved);
        self
    }
}

/// Filter criteria for review listings.
#[derive(Debug, Default)]
pub struct ReviewFilter {
    pub content_type: Option<ContentType>,
    pub comment_approved: Option<bool>,
    pub score: Option<i64>,
    pub user_id: Option<String>,
    pub limit: Option<u32>,
}

impl ReviewService {
    /// Validate and store a new review.
    ///
    /// A target whose content type is not configured as reviewable is accepted
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` before any write if the score or
    /// comment breaks the rules, or `DatabaseError` if the insert fails.
    pub async fn create_review(&self, new: NewReview) -> Result<Review, DatabaseError> {
        self.rules().validate(new.score, &new.comment)?;

        if !self.registry().is_reviewable(&new.target.content_type) {
            tracing::warn!(
                content_type = %new.target.content_type,
                "storing review for a content type not configured as reviewable"
            );
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_REVIEW).await?;
        let comment_approved = new
            .comment_approved
            .unwrap_or_else(|| self.rules().default_comment_approved());

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO reviews ({REVIEW_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
                ),
                libsql::params![
                    id.as_str(),
                    new.target.content_type.to_string(),
                    new.target.object_id.as_str(),
                    new.user_id.as_str(),
                    new.score,
                    new.comment.as_str(),
                    i64::from(comment_approved),
                    i64::from(new.anonymous),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::debug!(review_id = %id, target = %new.target, score = new.score, "review created");

        Ok(Review {
            id,
            target: new.target,
            user_id: new.user_id,
            score: new.score,
            comment: new.comment,
            comment_approved,
            anonymous: new.anonymous,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no review has this id.
    pub async fn get_review(&self, id: &str) -> Result<Review, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_review(&row)
    }

    /// Persist every field of `review` and refresh its `updated_at`.
    ///
    /// `created_at` is never written. On success `review.updated_at` holds the
    /// stored value.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` before any write if the review
    /// breaks the rules, or `DatabaseError::NoResult` if the row is gone.
    pub async fn save_review(&self, review: &mut Review) -> Result<(), DatabaseError> {
        self.rules().validate(review.score, &review.comment)?;

        let now = Utc::now();
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE reviews SET content_type = ?1, object_id = ?2, user_id = ?3, score = ?4,
                     comment = ?5, comment_approved = ?6, anonymous = ?7, updated_at = ?8
                 WHERE id = ?9",
                libsql::params![
                    review.target.content_type.to_string(),
                    review.target.object_id.as_str(),
                    review.user_id.as_str(),
                    review.score,
                    review.comment.as_str(),
                    i64::from(review.comment_approved),
                    i64::from(review.anonymous),
                    now.to_rfc3339(),
                    review.id.as_str()
                ],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }

        review.updated_at = now;
        tracing::debug!(review_id = %review.id, "review saved");
        Ok(())
    }

    /// Apply `update` to the stored review and save it in full.
    ///
    /// An empty update still re-saves and refreshes `updated_at`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_review`] and [`Self::save_review`].
    pub async fn update_review(
        &self,
        id: &str,
        update: ReviewUpdate,
    ) -> Result<Review, DatabaseError> {
        let mut review = self.get_review(id).await?;
        update.apply_to(&mut review);
        self.save_review(&mut review).await?;
        Ok(review)
    }

    /// Approve or withhold a review's comment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::update_review`].
    pub async fn set_comment_approved(
        &self,
        id: &str,
        approved: bool,
    ) -> Result<Review, DatabaseError> {
        let update = ReviewUpdateBuilder::new().comment_approved(approved).build();
        self.update_review(id, update).await
    }

    /// Remove a review. Nothing else is touched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no review has this id.
    pub async fn delete_review(&self, id: &str) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute("DELETE FROM reviews WHERE id = ?1", [id])
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        tracing::debug!(review_id = %id, "review deleted");
        Ok(())
    }

    /// Reviews of one target, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn reviews_for(&self, target: &TargetRef) -> Result<Vec<Review>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {REVIEW_COLUMNS} FROM reviews
                     WHERE content_type = ?1 AND object_id = ?2
                     ORDER BY created_at DESC"
                ),
                libsql::params![
                    target.content_type.to_string(),
                    target.object_id.as_str()
                ],
            )
            .await?;
        collect_reviews(rows).await
    }

    /// Reviews written by one user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>, DatabaseError> {
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {REVIEW_COLUMNS} FROM reviews
                     WHERE user_id = ?1 ORDER BY created_at DESC"
                ),
                [user_id],
            )
            .await?;
        collect_reviews(rows).await
    }

    /// Reviews matching every set filter field, newest first (default limit 100).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref ct) = filter.content_type {
            params.push(libsql::Value::Text(ct.to_string()));
            conditions.push(format!("content_type = ?{}", params.len()));
        }
        if let Some(approved) = filter.comment_approved {
            params.push(libsql::Value::Integer(i64::from(approved)));
            conditions.push(format!("comment_approved = ?{}", params.len()));
        }
        if let Some(score) = filter.score {
            params.push(libsql::Value::Integer(score));
            conditions.push(format!("score = ?{}", params.len()));
        }
        if let Some(ref user_id) = filter.user_id {
            params.push(libsql::Value::Text(user_id.clone()));
            conditions.push(format!("user_id = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews {where_clause}
             ORDER BY created_at DESC LIMIT {limit}"
        );

        let rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        collect_reviews(rows).await
    }
}
