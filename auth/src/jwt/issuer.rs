use chrono::DateTime;
use chrono::Utc;

use super::claims::Claims;
use super::claims::TokenType;
use super::config::SigningConfig;
use super::errors::TokenError;
use super::handler::JwtHandler;

/// Creates signed, time-bound tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    handler: JwtHandler,
}

impl TokenIssuer {
    pub fn new(config: &SigningConfig) -> Self {
        Self {
            handler: JwtHandler::new(config),
        }
    }

    /// Issue a token valid from now.
    pub fn issue(&self, subject: &str, token_type: TokenType) -> Result<String, TokenError> {
        self.issue_at(subject, token_type, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts (non-empty)
    /// * `token_type` - Purpose tag; selects the expiry window
    /// * `now` - Issuance instant
    ///
    /// # Errors
    /// * `EmptySubject` - Subject is empty
    /// * `EncodingFailed` - Signing failed
    pub fn issue_at(
        &self,
        subject: &str,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if subject.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        self.handler.encode(&Claims::issue(subject, token_type, now))
    }
}
