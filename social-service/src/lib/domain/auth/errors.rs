use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

const INVALID_CREDENTIALS: &str = "Could not validate credentials";

/// Error for authentication and current-user resolution.
///
/// Every unauthorized variant renders the same message; use [`AuthError::kind`]
/// to tell them apart.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("{}", INVALID_CREDENTIALS)]
    Token(#[from] TokenError),

    #[error("{}", INVALID_CREDENTIALS)]
    UserNotFound,

    #[error("{}", INVALID_CREDENTIALS)]
    InvalidPassword,

    #[error("Stored password hash is corrupt: {0}")]
    CorruptPasswordHash(#[source] PasswordError),

    #[error("User directory unavailable: {0}")]
    Directory(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Internal classification of an [`AuthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    ExpiredToken,
    MalformedToken,
    MissingSubject,
    TypeMismatch,
    UserNotFound,
    InvalidPassword,
    DataIntegrity,
    Unavailable,
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::Token(TokenError::ExpiredToken) => AuthErrorKind::ExpiredToken,
            AuthError::Token(TokenError::MalformedToken(_)) => AuthErrorKind::MalformedToken,
            AuthError::Token(TokenError::MissingSubject) => AuthErrorKind::MissingSubject,
            AuthError::Token(TokenError::TypeMismatch { .. }) => AuthErrorKind::TypeMismatch,
            // Issuance failures are not a property of the presented credentials.
            AuthError::Token(TokenError::EncodingFailed(_) | TokenError::EmptySubject) => {
                AuthErrorKind::Unavailable
            }
            AuthError::UserNotFound => AuthErrorKind::UserNotFound,
            AuthError::InvalidPassword => AuthErrorKind::InvalidPassword,
            AuthError::CorruptPasswordHash(_) => AuthErrorKind::DataIntegrity,
            AuthError::Directory(_) | AuthError::Internal(_) => AuthErrorKind::Unavailable,
        }
    }

    /// True for failures caused by the presented credentials.
    pub fn is_unauthorized(&self) -> bool {
        !matches!(
            self.kind(),
            AuthErrorKind::DataIntegrity | AuthErrorKind::Unavailable
        )
    }
}

#[cfg(test)]
mod tests {
    use auth::TokenType;

    use super::*;

    #[test]
    fn test_unauthorized_variants_share_message() {
        let errors = [
            AuthError::UserNotFound,
            AuthError::InvalidPassword,
            AuthError::Token(TokenError::ExpiredToken),
            AuthError::Token(TokenError::MissingSubject),
            AuthError::Token(TokenError::MalformedToken("bad signature".to_string())),
            AuthError::Token(TokenError::TypeMismatch {
                expected: TokenType::Access,
                found: Some("confirmation".to_string()),
            }),
        ];

        for error in errors {
            assert!(error.is_unauthorized());
            assert_eq!(error.to_string(), "Could not validate credentials");
        }
    }

    #[test]
    fn test_kinds_stay_distinct() {
        assert_eq!(AuthError::UserNotFound.kind(), AuthErrorKind::UserNotFound);
        assert_eq!(
            AuthError::InvalidPassword.kind(),
            AuthErrorKind::InvalidPassword
        );
        assert_eq!(
            AuthError::Token(TokenError::ExpiredToken).kind(),
            AuthErrorKind::ExpiredToken
        );
    }

    #[test]
    fn test_infrastructure_failures_are_not_unauthorized() {
        let corrupt = AuthError::CorruptPasswordHash(PasswordError::MalformedHash(
            "bad".to_string(),
        ));

        assert_eq!(corrupt.kind(), AuthErrorKind::DataIntegrity);
        assert!(!corrupt.is_unauthorized());
        assert!(!AuthError::Directory("timeout".to_string()).is_unauthorized());
    }
}
