use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::confirm_email::confirm_email;
use super::handlers::create_comment::create_comment;
use super::handlers::create_post::create_post;
use super::handlers::current_user::current_user;
use super::handlers::get_post::get_post;
use super::handlers::like_post::like_post;
use super::handlers::list_comments::list_comments;
use super::handlers::list_posts::list_posts;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::notification::ports::NotificationServicePort;
use crate::domain::post::ports::PostServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub auth_service: Arc<dyn AuthServicePort>,
    pub post_service: Arc<dyn PostServicePort>,
    pub notification_service: Arc<dyn NotificationServicePort>,
    /// Base URL for links in outgoing emails
    pub public_url: String,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/register", post(register))
        .route("/api/token", post(login))
        .route("/api/confirm/:token", get(confirm_email))
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:post_id", get(get_post))
        .route("/api/posts/:post_id/comments", get(list_comments));

    let protected_routes = Router::new()
        .route("/api/users/me", get(current_user))
        .route("/api/posts", post(create_post))
        .route("/api/comments", post(create_comment))
        .route("/api/likes", post(like_post))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri().path(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri().path(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
