use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::data::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    let registered = state
        .user_service
        .register_user(body.try_into_command()?)
        .await?;

    let confirmation_url = format!(
        "{}/api/confirm/{}",
        state.public_url.trim_end_matches('/'),
        registered.confirmation_token
    );
    let notifications = state.notification_service.clone();
    let email = registered.user.email.clone();
    tokio::spawn(async move {
        if let Err(e) = notifications
            .send_registration_email(email, &confirmation_url)
            .await
        {
            tracing::error!(error = %e, "Registration email failed");
        }
    });

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        RegisterResponseData {
            detail: "User created. Please confirm your email.".to_string(),
            user: (&registered.user).into(),
        },
    ))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        let email = EmailAddress::new(self.email)?;
        RegisterUserCommand::new(email, self.password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub detail: String,
    pub user: UserData,
}
