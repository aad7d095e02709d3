use chrono::DateTime;
use chrono::Utc;

use super::claims::Claims;
use super::claims::TokenType;
use super::config::SigningConfig;
use super::errors::TokenError;
use super::handler::JwtHandler;

/// Validates tokens and extracts their subject.
#[derive(Clone)]
pub struct TokenVerifier {
    handler: JwtHandler,
}

impl TokenVerifier {
    pub fn new(config: &SigningConfig) -> Self {
        Self {
            handler: JwtHandler::new(config),
        }
    }

    /// Resolve the subject of a token against the current clock.
    pub fn resolve_subject(
        &self,
        token: &str,
        expected_type: TokenType,
    ) -> Result<String, TokenError> {
        self.resolve_subject_at(token, expected_type, Utc::now())
    }

    /// Resolve the subject of a token as if the current time were `now`.
    ///
    /// Checks run in order: signature and encoding, expiry, subject, type.
    ///
    /// # Errors
    /// * `MalformedToken` - Bad signature or encoding, or no `exp` claim
    /// * `ExpiredToken` - `now` is past the embedded expiry
    /// * `MissingSubject` - `sub` claim absent or empty
    /// * `TypeMismatch` - `type` claim absent or not `expected_type`
    pub fn resolve_subject_at(
        &self,
        token: &str,
        expected_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims: Claims = self.handler.decode(token)?;

        if claims.exp.is_none() {
            return Err(TokenError::MalformedToken(
                "missing 'exp' claim".to_string(),
            ));
        }
        if claims.is_expired(now.timestamp()) {
            return Err(TokenError::ExpiredToken);
        }

        let subject = match claims.sub {
            Some(sub) if !sub.is_empty() => sub,
            _ => return Err(TokenError::MissingSubject),
        };

        if claims.token_type.as_deref() != Some(expected_type.as_str()) {
            return Err(TokenError::TypeMismatch {
                expected: expected_type,
                found: claims.token_type,
            });
        }

        Ok(subject)
    }
}
