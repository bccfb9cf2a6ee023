//! Shared test utilities for reviews-db unit tests.

use reviews_core::{ContentType, ReviewRules, TargetRef};

use crate::repos::review::NewReview;
use crate::reviewable::Reviewable;
use crate::service::ReviewService;

/// Host entity used as a review target in tests.
pub struct Product {
    pub id: i64,
}

impl Reviewable for Product {
    const CONTENT_TYPE: &'static str = "shop.product";
    const TABLE: &'static str = "products";

    fn object_id(&self) -> String {
        self.id.to_string()
    }
}

pub fn product_type() -> ContentType {
    "shop.product".parse().unwrap()
}

/// Rules with `shop.product` listed as reviewable.
pub fn test_rules() -> ReviewRules {
    ReviewRules {
        reviewable_models: vec![product_type()],
        ..ReviewRules::default()
    }
}

/// In-memory service with the given rules, a `products` table, and
/// `Product` registered.
pub async fn test_service_with_rules(rules: ReviewRules) -> ReviewService {
    let mut svc = ReviewService::new_local(":memory:", rules).await.unwrap();
    svc.db()
        .conn()
        .execute(
            "CREATE TABLE products (id INTEGER PRIMARY KEY, name TEXT NOT NULL UNIQUE)",
            (),
        )
        .await
        .unwrap();
    svc.register_reviewable::<Product>().unwrap();
    svc
}

pub async fn test_service() -> ReviewService {
    test_service_with_rules(test_rules()).await
}

pub async fn insert_product(svc: &ReviewService, name: &str) -> Product {
    svc.db()
        .conn()
        .execute("INSERT INTO products (name) VALUES (?1)", [name])
        .await
        .unwrap();
    Product {
        id: svc.db().conn().last_insert_rowid(),
    }
}

pub fn new_review(target: &TargetRef, user_id: &str, score: i64) -> NewReview {
    NewReview::new(target.clone(), user_id, score)
}
