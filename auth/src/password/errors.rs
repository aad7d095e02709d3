use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash is not a well-formed PHC string.
    ///
    /// This points at corrupt stored data rather than a wrong password.
    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}
