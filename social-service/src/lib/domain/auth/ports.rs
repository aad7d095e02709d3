use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::user::models::User;

/// Port for credential checks and current-user resolution.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Check an email and plaintext password against the user directory.
    ///
    /// # Errors
    /// * `UserNotFound` - No account with this email
    /// * `InvalidPassword` - Password does not match
    /// * `CorruptPasswordHash` - Stored hash could not be parsed
    /// * `Directory` - Lookup failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Resolve the user an access token belongs to.
    ///
    /// # Errors
    /// * `Token` - Token is expired, malformed, missing its subject or not an access token
    /// * `UserNotFound` - Token subject has no account
    /// * `Directory` - Lookup failed
    async fn resolve_current_user(&self, token: &str) -> Result<User, AuthError>;

    /// Issue an access token for an authenticated user.
    fn issue_access_token(&self, user: &User) -> Result<String, AuthError>;
}
