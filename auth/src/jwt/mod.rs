pub mod claims;
pub mod config;
pub mod errors;
pub mod handler;
pub mod issuer;
pub mod verifier;

pub use claims::Claims;
pub use claims::TokenType;
pub use config::SigningConfig;
pub use errors::SigningConfigError;
pub use errors::TokenError;
pub use handler::JwtHandler;
pub use issuer::TokenIssuer;
pub use verifier::TokenVerifier;
