use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::notification::errors::NotificationError;
use crate::domain::notification::models::EmailMessage;
use crate::domain::notification::models::ImageRequest;
use crate::domain::notification::models::ImageTaskOutcome;
use crate::domain::notification::ports::ImageGenerator;
use crate::domain::notification::ports::Mailer;
use crate::domain::notification::ports::NotificationServicePort;
use crate::domain::post::ports::PostRepository;
use crate::domain::user::models::EmailAddress;

/// Sends account emails and runs the post image task.
pub struct NotificationService<M, G, PR>
where
    M: Mailer,
    G: ImageGenerator,
    PR: PostRepository,
{
    mailer: Arc<M>,
    generator: Arc<G>,
    posts: Arc<PR>,
}

impl<M, G, PR> NotificationService<M, G, PR>
where
    M: Mailer,
    G: ImageGenerator,
    PR: PostRepository,
{
    pub fn new(mailer: Arc<M>, generator: Arc<G>, posts: Arc<PR>) -> Self {
        Self {
            mailer,
            generator,
            posts,
        }
    }
}

#[async_trait]
impl<M, G, PR> NotificationServicePort for NotificationService<M, G, PR>
where
    M: Mailer,
    G: ImageGenerator,
    PR: PostRepository,
{
    async fn send_registration_email(
        &self,
        email: EmailAddress,
        confirmation_url: &str,
    ) -> Result<(), NotificationError> {
        self.mailer
            .send_email(EmailMessage::registration(email, confirmation_url))
            .await
    }

    async fn generate_and_attach_image(
        &self,
        request: ImageRequest,
    ) -> Result<ImageTaskOutcome, NotificationError> {
        let ImageRequest {
            email,
            post_id,
            post_url,
            prompt,
        } = request;

        let image = match self.generator.generate(&prompt).await {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(post_id = %post_id, error = %e, "Image generation failed");
                self.mailer
                    .send_email(EmailMessage::image_failed(email, &post_url))
                    .await?;
                return Ok(ImageTaskOutcome::Failed {
                    reason: e.to_string(),
                });
            }
        };

        self.posts.set_image_url(post_id, &image.output_url).await?;
        tracing::debug!(post_id = %post_id, "Image attached to post");

        self.mailer
            .send_email(EmailMessage::image_generated(email, &post_url))
            .await?;

        Ok(ImageTaskOutcome::Attached {
            image_url: image.output_url,
        })
    }
}
