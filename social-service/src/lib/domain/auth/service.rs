use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenType;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserDirectory;

/// Authenticates credentials and resolves access tokens against the user directory.
pub struct AuthService<UD>
where
    UD: UserDirectory,
{
    directory: Arc<UD>,
    authenticator: Arc<Authenticator>,
}

impl<UD> AuthService<UD>
where
    UD: UserDirectory,
{
    pub fn new(directory: Arc<UD>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            directory,
            authenticator,
        }
    }

    async fn lookup(&self, email: &str) -> Result<Option<User>, AuthError> {
        let user = self.directory.find_by_email(email).await.map_err(|e| {
            tracing::error!(error = %e, "User directory lookup failed");
            AuthError::Directory(e.to_string())
        })?;

        tracing::debug!(email, found = user.is_some(), "User directory lookup");
        Ok(user)
    }
}

#[async_trait]
impl<UD> AuthServicePort for AuthService<UD>
where
    UD: UserDirectory,
{
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let hasher = self.authenticator.password_hasher();
        let password = password.to_string();

        let Some(user) = self.lookup(email).await? else {
            // Same hashing cost as a wrong password.
            tokio::task::spawn_blocking(move || hasher.verify_dummy(&password))
                .await
                .map_err(|e| AuthError::Internal(e.to_string()))?;
            return Err(AuthError::UserNotFound);
        };

        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Stored password hash is malformed");
                AuthError::CorruptPasswordHash(e)
            })?;

        if matches {
            Ok(user)
        } else {
            Err(AuthError::InvalidPassword)
        }
    }

    async fn resolve_current_user(&self, token: &str) -> Result<User, AuthError> {
        let email = self
            .authenticator
            .resolve_subject(token, TokenType::Access)
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected access token");
                AuthError::Token(e)
            })?;

        self.lookup(&email).await?.ok_or(AuthError::UserNotFound)
    }

    fn issue_access_token(&self, user: &User) -> Result<String, AuthError> {
        self.authenticator
            .create_access_token(user.email.as_str())
            .map_err(|e| AuthError::Internal(e.to_string()))
    }
}
