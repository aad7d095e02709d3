use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenType;
use chrono::Utc;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RegisteredUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token toolkit
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register_user(
        &self,
        command: RegisterUserCommand,
    ) -> Result<RegisteredUser, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let hasher = self.authenticator.password_hasher();
        let password = command.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            confirmed: false,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        let confirmation_token = self
            .authenticator
            .create_confirmation_token(created_user.email.as_str())
            .map_err(|e| UserError::Unknown(format!("Confirmation token not issued: {}", e)))?;

        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(RegisteredUser {
            user: created_user,
            confirmation_token,
        })
    }

    async fn confirm_user(&self, token: &str) -> Result<User, UserError> {
        let email = self
            .authenticator
            .resolve_subject(token, TokenType::Confirmation)
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected confirmation token");
                UserError::InvalidConfirmationToken(e)
            })?;

        let user = self.repository.confirm(&email).await?;
        tracing::info!(user_id = %user.id, "User confirmed");

        Ok(user)
    }
}
