//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the service:
//! - Password hashing (Argon2id)
//! - Typed, time-bound JWTs (`access` and `confirmation`)
//! - An `Authenticator` bundling both behind one immutable signing configuration
//!
//! User lookup lives in the service, which owns its user directory and
//! composes it with these primitives.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("other_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{SigningConfig, TokenError, TokenIssuer, TokenType, TokenVerifier};
//!
//! let config = SigningConfig::new("secret_key_at_least_32_bytes_long!", "HS256").unwrap();
//! let issuer = TokenIssuer::new(&config);
//! let verifier = TokenVerifier::new(&config);
//!
//! let token = issuer.issue("alice@example.com", TokenType::Access).unwrap();
//! assert_eq!(
//!     verifier.resolve_subject(&token, TokenType::Access).unwrap(),
//!     "alice@example.com"
//! );
//! assert!(matches!(
//!     verifier.resolve_subject(&token, TokenType::Confirmation),
//!     Err(TokenError::TypeMismatch { .. })
//! ));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtHandler;
pub use jwt::SigningConfig;
pub use jwt::SigningConfigError;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenType;
pub use jwt::TokenVerifier;
pub use password::PasswordError;
pub use password::PasswordHasher;
