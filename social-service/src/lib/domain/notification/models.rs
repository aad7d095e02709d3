use crate::domain::post::models::PostId;
use crate::domain::user::models::EmailAddress;

/// Prompt used when a post asks for an image without one.
pub const DEFAULT_PROMPT: &str = "A blue cat is sitting on couch";

pub const REGISTRATION_SUBJECT: &str = "Successfully signed up";
pub const IMAGE_GENERATED_SUBJECT: &str = "Image generated successfully";
pub const IMAGE_FAILED_SUBJECT: &str = "Failed to generate image";

/// A plain-text email to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: EmailAddress,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn registration(to: EmailAddress, confirmation_url: &str) -> Self {
        Self {
            subject: REGISTRATION_SUBJECT.to_string(),
            body: format!(
                "Hi {}! You have successfully signed up to Social Media REST API. \
                 Please confirm your email by clicking on the following link: {}",
                to, confirmation_url
            ),
            to,
        }
    }

    pub fn image_generated(to: EmailAddress, post_url: &str) -> Self {
        Self {
            subject: IMAGE_GENERATED_SUBJECT.to_string(),
            body: format!(
                "Hi {}! You have successfully generated image for post {}. \
                 Please check your email for the image.",
                to, post_url
            ),
            to,
        }
    }

    pub fn image_failed(to: EmailAddress, post_url: &str) -> Self {
        Self {
            subject: IMAGE_FAILED_SUBJECT.to_string(),
            body: format!(
                "Hi {}! You have failed to generate image for post {}. \
                 Please try again later.",
                to, post_url
            ),
            to,
        }
    }
}

/// Result returned by an image generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub output_url: String,
}

/// Everything the image task needs to run after the post is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub email: EmailAddress,
    pub post_id: PostId,
    pub post_url: String,
    pub prompt: String,
}

/// Which continuation the image task ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageTaskOutcome {
    /// Image stored on the post and success email sent
    Attached { image_url: String },
    /// Generation failed and the failure email was sent
    Failed { reason: String },
}
