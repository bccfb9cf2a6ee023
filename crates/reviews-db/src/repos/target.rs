//! Target resolution through the reviewable registry.
//!
//! Reviews hold only a `TargetRef`. Deleting a host row leaves its reviews in
//! place; these lookups let the host find out which targets are gone.

use reviews_core::{CoreError, Review, TargetRef};

use crate::error::DatabaseError;
use crate::helpers::quote_ident;
use crate::repos::review::{REVIEW_COLUMNS, collect_reviews};
use crate::service::ReviewService;

impl ReviewService {
    /// Whether the host row a reference points at exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core(CoreError::NotReviewable)` if the content
    /// type has no registered table, or `DatabaseError` if the query fails.
    pub async fn target_exists(&self, target: &TargetRef) -> Result<bool, DatabaseError> {
        let table = self
            .registry()
            .table_for(&target.content_type)
            .ok_or_else(|| CoreError::NotReviewable {
                content_type: target.content_type.to_string(),
            })?;

        let sql = format!(
            "SELECT 1 FROM {} WHERE CAST({} AS TEXT) = ?1 LIMIT 1",
            quote_ident(table.table),
            quote_ident(table.id_column)
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, [target.object_id.as_str()])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Reviews whose target row no longer exists, across every registered type.
    ///
    /// Reviews of unregistered content types cannot be resolved and are
    /// never reported.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn orphaned_reviews(&self) -> Result<Vec<Review>, DatabaseError> {
        let mut orphans = Vec::new();
        for (content_type, table) in self.registry().registered() {
            let sql = format!(
                "SELECT {REVIEW_COLUMNS} FROM reviews r
                 WHERE r.content_type = ?1
                   AND NOT EXISTS (
                       SELECT 1 FROM {table_name} t
                       WHERE CAST(t.{id_column} AS TEXT) = r.object_id
                   )
                 ORDER BY r.created_at DESC",
                table_name = quote_ident(table.table),
                id_column = quote_ident(table.id_column),
            );
            let rows = self
                .db()
                .conn()
                .query(&sql, [content_type.to_string()])
                .await?;
            let found = collect_reviews(rows).await?;
            if !found.is_empty() {
                tracing::debug!(%content_type, count = found.len(), "found orphaned reviews");
            }
            orphans.extend(found);
        }
        Ok(orphans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    use crate::reviewable::Reviewable;
    use crate::test_support::{insert_product, new_review, test_service};

    #[tokio::test]
    async fn existing_target_resolves() {
        let svc = test_service().await;
        let product = insert_product(&svc, "Lamp").await;
        assert!(svc.target_exists(&product.target().unwrap()).await.unwrap());
    }

    #[tokio::test]
    async fn missing_target_does_not_resolve() {
        let svc = test_service().await;
        let target = TargetRef::new("shop.product".parse().unwrap(), "404");
        assert!(!svc.target_exists(&target).await.unwrap());
    }

    #[tokio::test]
    async fn unregistered_type_cannot_be_resolved() {
        let svc = test_service().await;
        let target = TargetRef::new("shop.seller".parse().unwrap(), "1");
        assert!(matches!(
            svc.target_exists(&target).await,
            Err(DatabaseError::Core(CoreError::NotReviewable { .. }))
        ));
    }

    #[tokio::test]
    async fn deleting_target_leaves_orphaned_reviews() {
        let svc = test_service().await;
        let lamp = insert_product(&svc, "Lamp").await;
        let desk = insert_product(&svc, "Desk").await;
        let lamp_target = lamp.target().unwrap();

        let orphan = svc
            .create_review(new_review(&lamp_target, "user-1", 4))
            .await
            .unwrap();
        svc.create_review(new_review(&desk.target().unwrap(), "user-1", 2))
            .await
            .unwrap();
        assert!(svc.orphaned_reviews().await.unwrap().is_empty());

        svc.db()
            .conn()
            .execute("DELETE FROM products WHERE id = ?1", [lamp.id])
            .await
            .unwrap();

        assert!(!svc.target_exists(&lamp_target).await.unwrap());
        let orphans = svc.orphaned_reviews().await.unwrap();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].id, orphan.id);

        // The reviews stay readable and still aggregate.
        assert_eq!(svc.reviews_for(&lamp_target).await.unwrap().len(), 1);
        assert_eq!(svc.average_score(&lamp_target).await.unwrap(), Some(4.0));
    }

    #[tokio::test]
    async fn unregistered_reviews_are_not_orphans() {
        let svc = test_service().await;
        let seller = TargetRef::new("shop.seller".parse().unwrap(), "1");
        svc.create_review(new_review(&seller, "user-1", 3))
            .await
            .unwrap();
        assert!(svc.orphaned_reviews().await.unwrap().is_empty());
    }
}
