//! Review update builder.

use reviews_core::Review;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub score: Option<i64>,
    pub comment: Option<String>,
    pub comment_approved: Option<bool>,
    pub anonymous: Option<bool>,
}

impl ReviewUpdate {
    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.score.is_none()
            && self.comment.is_none()
            && self.comment_approved.is_none()
            && self.anonymous.is_none()
    }

    /// Copy every `Some` field onto `review`.
    pub fn apply_to(self, review: &mut Review) {
        if let Some(score) = self.score {
            review.score = score;
        }
        if let Some(comment) = self.comment {
            review.comment = comment;
        }
        if let Some(approved) = self.comment_approved {
            review.comment_approved = approved;
        }
        if let Some(anonymous) = self.anonymous {
            review.anonymous = anonymous;
        }
    }
}

#[derive(Default)]
pub struct ReviewUpdateBuilder(ReviewUpdate);

impl ReviewUpdateBuilder {
    pub fn new() -> Self {
        Self(ReviewUpdate::default())
    }

    pub const fn score(mut self, val: i64) -> Self {
        self.0.score = Some(val);
        self
    }

    pub fn comment(mut self, val: impl Into<String>) -> Self {
        self.0.comment = Some(val.into());
        self
    }

    pub const fn comment_approved(mut self, val: bool) -> Self {
        self.0.comment_approved = Some(val);
        self
    }

    pub const fn anonymous(mut self, val: bool) -> Self {
        self.0.anonymous = Some(val);
        self
    }

    pub fn build(self) -> ReviewUpdate {
        self.0
    }
}
