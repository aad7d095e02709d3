use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::Like;
use crate::domain::post::models::PostId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn like_post(
    State(state): State<AppState>,
    Extension(current): Extension<AuthenticatedUser>,
    Json(body): Json<LikePostRequest>,
) -> Result<ApiSuccess<LikeData>, ApiError> {
    let post_id = PostId::from_string(&body.post_id).map_err(PostError::from)?;

    let like = state
        .post_service
        .like_post(post_id, current.user.id)
        .await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, (&like).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LikePostRequest {
    post_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeData {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Like> for LikeData {
    fn from(like: &Like) -> Self {
        Self {
            id: like.id.to_string(),
            post_id: like.post_id.to_string(),
            user_id: like.user_id.to_string(),
            created_at: like.created_at,
        }
    }
}
