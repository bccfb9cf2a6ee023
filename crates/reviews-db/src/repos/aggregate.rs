//! Aggregates over a target's reviews and the edit-recency check.
//!
//! Values are computed from the live rows on every call; nothing is cached.

use chrono::{DateTime, Utc};
use reviews_core::{Review, TargetRef};

use crate::error::DatabaseError;
use crate::service::ReviewService;

impl ReviewService {
    /// Mean score of the target's reviews, rounded to `average_score_digits`.
    ///
    /// Returns `None` when the target has no reviews.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn average_score(&self, target: &TargetRef) -> Result<Option<f64>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT AVG(score) FROM reviews WHERE content_type = ?1 AND object_id = ?2",
                libsql::params![
                    target.content_type.to_string(),
                    target.object_id.as_str()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let average = row.get::<Option<f64>>(0)?;
        Ok(average.map(|avg| self.rules().round_average(avg)))
    }

    /// Number of reviews pointing at the target.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn review_count(&self, target: &TargetRef) -> Result<u64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM reviews WHERE content_type = ?1 AND object_id = ?2",
                libsql::params![
                    target.content_type.to_string(),
                    target.object_id.as_str()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let count = row.get::<i64>(0)?;
        u64::try_from(count).map_err(|e| DatabaseError::Query(format!("Negative count {count}: {e}")))
    }

    /// `Some(updated_at)` if the review was saved again more than the
    /// configured threshold after creation, `None` otherwise.
    #[must_use]
    pub fn is_recently_updated(&self, review: &Review) -> Option<DateTime<Utc>> {
        review.is_recently_updated(self.rules().update_threshold)
    }
}
