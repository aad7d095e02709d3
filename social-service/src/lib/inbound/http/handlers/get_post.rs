use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::data::CommentData;
use super::data::PostWithLikesData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::errors::PostError;
use crate::domain::post::models::PostId;
use crate::inbound::http::router::AppState;

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<PostWithCommentsData>, ApiError> {
    let post_id = PostId::from_string(&post_id).map_err(PostError::from)?;

    let detail = state.post_service.get_post(post_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        PostWithCommentsData {
            post: (&detail.post).into(),
            comments: detail.comments.iter().map(CommentData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostWithCommentsData {
    pub post: PostWithLikesData,
    pub comments: Vec<CommentData>,
}
