use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::data::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::notification::models::ImageRequest;
use crate::domain::notification::models::DEFAULT_PROMPT;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::Content;
use crate::domain::post::models::CreatePostCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Publish a post. With a `prompt` query parameter an image is generated in the background.
pub async fn create_post(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Query(params): Query<CreatePostParams>,
    Json(body): Json<CreatePostRequest>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    let post = state
        .post_service
        .create_post(body.try_into_command()?, current.user.id)
        .await?;

    if let Some(prompt) = params.prompt {
        let prompt = if prompt.trim().is_empty() {
            DEFAULT_PROMPT.to_string()
        } else {
            prompt
        };
        let request = ImageRequest {
            email: current.user.email.clone(),
            post_id: post.id,
            post_url: format!(
                "{}/api/posts/{}",
                state.public_url.trim_end_matches('/'),
                post.id
            ),
            prompt,
        };
        let notifications = state.notification_service.clone();
        tokio::spawn(async move {
            let post_id = request.post_id;
            match notifications.generate_and_attach_image(request).await {
                Ok(outcome) => tracing::debug!(post_id = %post_id, ?outcome, "Image task finished"),
                Err(e) => tracing::error!(post_id = %post_id, error = %e, "Image task failed"),
            }
        });
    }

    Ok(ApiSuccess::new(StatusCode::CREATED, (&post).into()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostParams {
    prompt: Option<String>,
}

/// HTTP request body for creating a post (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequest {
    body: String,
}

impl CreatePostRequest {
    fn try_into_command(self) -> Result<CreatePostCommand, PostError> {
        Ok(CreatePostCommand {
            body: Content::new(self.body)?,
        })
    }
}
