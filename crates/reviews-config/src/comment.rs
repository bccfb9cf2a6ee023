//! Comment constraints.

use serde::{Deserialize, Serialize};

const fn default_max_length() -> usize {
    1000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommentConfig {
    /// Maximum comment length in characters.
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Reject reviews without a comment.
    #[serde(default)]
    pub required: bool,

    /// New reviews start with `comment_approved = false`.
    #[serde(default)]
    pub approval_required: bool,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            required: false,
            approval_required: false,
        }
    }
}
