use chrono::{DateTime, TimeDelta, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::content_type::TargetRef;

/// A scored, commented evaluation of a reviewable target by a user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    pub target: TargetRef,
    /// Host-owned user identity.
    pub user_id: String,
    pub score: i64,
    pub comment: String,
    pub comment_approved: bool,
    /// The reviewer asked not to be shown alongside the review.
    pub anonymous: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    /// Return `updated_at` if the review was edited more than `threshold` after creation.
    ///
    /// A freshly created review has `updated_at` within save latency of
    /// `created_at`; the threshold absorbs that gap.
    #[must_use]
    pub fn is_recently_updated(&self, threshold: TimeDelta) -> Option<DateTime<Utc>> {
        (self.updated_at - self.created_at > threshold).then_some(self.updated_at)
    }
}
