use async_trait::async_trait;

use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::models::EmailMessage;
use crate::domain::notification::models::GeneratedImage;
use crate::domain::notification::models::ImageRequest;
use crate::domain::notification::models::ImageTaskOutcome;
use crate::domain::user::models::EmailAddress;

/// Outbound email delivery.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// # Errors
    /// * `ApiResponse` - Provider rejected the message
    /// * `Transport` - Provider could not be reached
    async fn send_email(&self, message: EmailMessage) -> Result<(), NotificationError>;
}

/// Text-to-image generation.
#[async_trait]
pub trait ImageGenerator: Send + Sync + 'static {
    /// # Errors
    /// * `ApiResponse` - Provider returned an error status or an unparsable body
    /// * `Transport` - Provider could not be reached
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, NotificationError>;
}

/// Background side effects triggered by user actions.
#[async_trait]
pub trait NotificationServicePort: Send + Sync + 'static {
    /// Email the confirmation link to a newly registered user.
    async fn send_registration_email(
        &self,
        email: EmailAddress,
        confirmation_url: &str,
    ) -> Result<(), NotificationError>;

    /// Generate an image for a post, attach it and tell the author how it went.
    ///
    /// A generator failure is reported as `ImageTaskOutcome::Failed`; only a
    /// failure to store the image or to send the email is an error.
    async fn generate_and_attach_image(
        &self,
        request: ImageRequest,
    ) -> Result<ImageTaskOutcome, NotificationError>;
}
