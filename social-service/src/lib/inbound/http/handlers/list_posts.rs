use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::data::PostWithLikesData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::PostSorting;
use crate::inbound::http::router::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<ListPostsParams>,
) -> Result<ApiSuccess<Vec<PostWithLikesData>>, ApiError> {
    let sorting = match params.sorting.as_deref() {
        Some(sorting) => sorting.parse::<PostSorting>()?,
        None => PostSorting::default(),
    };

    let posts = state.post_service.list_posts(sorting).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        posts.iter().map(PostWithLikesData::from).collect(),
    ))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsParams {
    sorting: Option<String>,
}
