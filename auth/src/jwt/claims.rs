use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Purpose tag embedded in every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived credential authorizing API calls.
    Access,
    /// Long-lived credential for one-time actions such as email confirmation.
    Confirmation,
}

impl TokenType {
    pub const ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;
    pub const CONFIRMATION_TOKEN_EXPIRE_MINUTES: i64 = 1440;

    /// Wire name stored in the `type` claim.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Confirmation => "confirmation",
        }
    }

    /// Fixed validity window for tokens of this type.
    pub fn lifetime(&self) -> Duration {
        match self {
            TokenType::Access => Duration::minutes(Self::ACCESS_TOKEN_EXPIRE_MINUTES),
            TokenType::Confirmation => Duration::minutes(Self::CONFIRMATION_TOKEN_EXPIRE_MINUTES),
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token payload.
///
/// Fields are optional on the decoding side so that a token missing a claim
/// can be reported precisely instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the user's email)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Token type (`access` or `confirmation`)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    /// Build the claims for a token issued at `now`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token asserts
    /// * `token_type` - Purpose tag, which also selects the lifetime
    /// * `now` - Issuance instant
    pub fn issue(subject: impl ToString, token_type: TokenType, now: DateTime<Utc>) -> Self {
        Self {
            sub: Some(subject.to_string()),
            token_type: Some(token_type.as_str().to_string()),
            exp: Some((now + token_type.lifetime()).timestamp()),
            iat: Some(now.timestamp()),
        }
    }

    /// Drop the subject claim.
    pub fn without_subject(mut self) -> Self {
        self.sub = None;
        self
    }

    /// Set token type claim to an arbitrary value.
    pub fn with_token_type(mut self, token_type: impl ToString) -> Self {
        self.token_type = Some(token_type.to_string());
        self
    }

    /// Check if token is expired at `current_timestamp`.
    ///
    /// A token stays valid through its expiry second. Tokens without an
    /// `exp` claim never report expired here; the verifier rejects them.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }
}
