use chrono::DateTime;
use chrono::Utc;

use crate::jwt::SigningConfig;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenType;
use crate::jwt::TokenVerifier;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Credential toolkit combining password hashing with token issuance and verification.
///
/// Constructed once from the process signing configuration and shared
/// read-only between requests.
#[derive(Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Secret key and algorithm used to sign every token
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(config: &SigningConfig) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            issuer: TokenIssuer::new(config),
            verifier: TokenVerifier::new(config),
        }
    }

    pub fn password_hasher(&self) -> PasswordHasher {
        self.password_hasher
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is not a PHC string
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue an access token (30 minutes) for `subject`.
    pub fn create_access_token(&self, subject: &str) -> Result<String, TokenError> {
        self.issuer.issue(subject, TokenType::Access)
    }

    /// Issue a confirmation token (24 hours) for `subject`.
    pub fn create_confirmation_token(&self, subject: &str) -> Result<String, TokenError> {
        self.issuer.issue(subject, TokenType::Confirmation)
    }

    /// Issue a token of any type as if the current time were `now`.
    ///
    /// Clock-injection entry point for tests and tooling; request paths use
    /// `create_access_token` and `create_confirmation_token`.
    pub fn issue_token_at(
        &self,
        subject: &str,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.issuer.issue_at(subject, token_type, now)
    }

    /// Validate a token and return its subject.
    ///
    /// # Errors
    /// * `MalformedToken`, `ExpiredToken`, `MissingSubject`, `TypeMismatch`
    pub fn resolve_subject(
        &self,
        token: &str,
        expected_type: TokenType,
    ) -> Result<String, TokenError> {
        self.verifier.resolve_subject(token, expected_type)
    }

    /// Validate a token against an explicit clock.
    ///
    /// Clock-injection entry point for tests and tooling; request paths use
    /// `resolve_subject`.
    pub fn resolve_subject_at(
        &self,
        token: &str,
        expected_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.verifier.resolve_subject_at(token, expected_type, now)
    }
}
