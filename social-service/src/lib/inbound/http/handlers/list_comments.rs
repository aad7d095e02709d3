use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::data::CommentData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostId;
use crate::inbound::http::router::AppState;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<Vec<CommentData>>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    let comments = state.post_service.list_comments(post_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        comments.iter().map(CommentData::from).collect(),
    ))
}
