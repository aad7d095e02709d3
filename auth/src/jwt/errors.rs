use thiserror::Error;

use super::claims::TokenType;

/// Error type for token issuance and verification.
///
/// Every verification variant is an expected, caller-facing failure; callers
/// collapse them into one "unauthorized" outcome at their boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token subject must not be empty")]
    EmptySubject,

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid token: {0}")]
    MalformedToken(String),

    #[error("Token is missing 'sub' field")]
    MissingSubject,

    #[error("Token has incorrect type, expected '{expected}'")]
    TypeMismatch {
        expected: TokenType,
        found: Option<String>,
    },
}

/// Error type for signing configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningConfigError {
    #[error("Signing secret must not be empty")]
    EmptySecret,

    #[error("Unsupported signing algorithm: {0} (expected one of HS256, HS384, HS512)")]
    UnsupportedAlgorithm(String),
}
