use thiserror::Error;

use crate::domain::post::errors::PostError;

/// Error for outbound email and image generation work
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// Third-party API answered with an error or an unusable body
    #[error("{0}")]
    ApiResponse(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Post update failed: {0}")]
    Post(#[from] PostError),
}
