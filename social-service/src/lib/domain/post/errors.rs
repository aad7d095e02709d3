use thiserror::Error;

use crate::domain::post::models::PostId;
use crate::domain::user::models::UserId;

/// Error for identifier parsing failures (posts, comments, likes)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for post and comment body validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentError {
    #[error("Body must not be empty")]
    Empty,

    #[error("Body too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for posts, comments and likes
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Invalid body: {0}")]
    InvalidContent(#[from] ContentError),

    #[error("Invalid sorting: {0} (expected new, old or most_likes)")]
    InvalidSorting(String),

    #[error("Post with id {0} not found")]
    NotFound(PostId),

    #[error("User {user_id} already liked post {post_id}")]
    AlreadyLiked { post_id: PostId, user_id: UserId },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for PostError {
    fn from(err: anyhow::Error) -> Self {
        PostError::Unknown(err.to_string())
    }
}
