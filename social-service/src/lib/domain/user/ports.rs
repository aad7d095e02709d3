use async_trait::async_trait;

use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::RegisteredUser;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new, unconfirmed user.
    ///
    /// # Arguments
    /// * `command` - Validated command containing email and password
    ///
    /// # Returns
    /// Created user and its confirmation token
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn register_user(&self, command: RegisterUserCommand)
        -> Result<RegisteredUser, UserError>;

    /// Mark the user named by a confirmation token as confirmed.
    ///
    /// # Errors
    /// * `InvalidConfirmationToken` - Token is expired, malformed or not a confirmation token
    /// * `NotFound` - Token subject has no account
    /// * `DatabaseError` - Database operation failed
    async fn confirm_user(&self, token: &str) -> Result<User, UserError>;
}

/// Read side of user persistence: the user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: UserDirectory {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Set the confirmed flag of the user with this email.
    ///
    /// # Errors
    /// * `NotFound` - No user with this email
    /// * `DatabaseError` - Database operation failed
    async fn confirm(&self, email: &str) -> Result<User, UserError>;
}
