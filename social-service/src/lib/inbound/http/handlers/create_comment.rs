use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::data::CommentData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::Content;
use crate::domain::post::models::CreateCommentCommand;
use crate::domain::post::models::PostId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(body): Json<CreateCommentRequest>,
) -> Result<ApiSuccess<CommentData>, ApiError> {
    let comment = state
        .post_service
        .create_comment(body.try_into_command()?, current.user.id)
        .await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, (&comment).into()))
}

/// HTTP request body for commenting on a post (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCommentRequest {
    body: String,
    post_id: String,
}

impl CreateCommentRequest {
    fn try_into_command(self) -> Result<CreateCommentCommand, PostError> {
        Ok(CreateCommentCommand {
            body: Content::new(self.body)?,
            post_id: PostId::from_string(&self.post_id)?,
        })
    }
}
