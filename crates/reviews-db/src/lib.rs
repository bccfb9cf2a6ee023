//! # reviews-db
//!
//! libSQL storage for reviews.
//!
//! Holds the `reviews` table, the [`Reviewable`] trait host entities implement,
//! the registry that resolves generic target references to host tables, and
//! the review repository (`impl ReviewService` blocks under `repos`).
//!
//! Targets and users are owned by the host. Reviews reference them by value
//! only; nothing here cascades into host tables or out of them.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod reviewable;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

pub use error::DatabaseError;
pub use repos::review::{NewReview, ReviewFilter};
pub use reviewable::{Reviewable, ReviewableRegistry};
pub use service::ReviewService;
pub use updates::review::{ReviewUpdate, ReviewUpdateBuilder};

use libsql::Builder;

/// Raw database handle: a libSQL database plus one connection.
pub struct ReviewDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl ReviewDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let review_db = Self { db, conn };
        review_db.run_migrations().await?;
        tracing::debug!(path, "opened review database");
        Ok(review_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    ///
    /// Hosts use this to keep their own entity tables in the same database.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"rev-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> ReviewDb {
        ReviewDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let mut rows = db
            .conn()
            .query(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='reviews'",
                (),
            )
            .await
            .unwrap();
        assert!(rows.next().await.unwrap().is_some(), "reviews table should exist");
    }

    #[tokio::test]
    async fn indexes_exist() {
        let db = test_db().await;
        for index in [
            "idx_reviews_target",
            "idx_reviews_user",
            "idx_reviews_approved",
            "idx_reviews_created",
        ] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='index' AND name=?1",
                    [index],
                )
                .await
                .unwrap();
            assert!(
                rows.next().await.unwrap().is_some(),
                "index '{index}' should exist"
            );
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("rev").await.unwrap();
        assert!(id.starts_with("rev-"), "ID should start with 'rev-': {id}");
        assert_eq!(id.len(), 12, "3 prefix + 1 dash + 8 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in reviews_core::ids::ALL_PREFIXES {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("rev").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn schema_allows_duplicate_user_target_pairs() {
        let db = test_db().await;
        for id in ["rev-00000001", "rev-00000002"] {
            db.conn()
                .execute(
                    "INSERT INTO reviews (id, content_type, object_id, user_id, score) VALUES (?1, 'shop.product', '1', 'user-1', 4)",
                    [id],
                )
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn column_defaults_apply() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO reviews (id, content_type, object_id, user_id, score) VALUES ('rev-00000001', 'shop.product', '1', 'user-1', 4)",
                (),
            )
            .await
            .unwrap();

        let mut rows = db
            .conn()
            .query(
                "SELECT comment, comment_approved, anonymous FROM reviews WHERE id = 'rev-00000001'",
                (),
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "");
        assert_eq!(row.get::<i64>(1).unwrap(), 1);
        assert_eq!(row.get::<i64>(2).unwrap(), 0);
    }
}
