use std::fmt;
use std::str::FromStr;

use jsonwebtoken::Algorithm;

use super::errors::SigningConfigError;

/// Process-wide token signing configuration.
///
/// Built once at startup from the secret key and algorithm identifier, then
/// shared read-only by the issuer and verifier.
#[derive(Clone)]
pub struct SigningConfig {
    secret: Vec<u8>,
    algorithm: Algorithm,
}

impl SigningConfig {
    /// Create a signing configuration from a secret and an algorithm identifier.
    ///
    /// # Arguments
    /// * `secret` - Shared HMAC secret
    /// * `algorithm` - Algorithm identifier such as `"HS256"`
    ///
    /// # Errors
    /// * `EmptySecret` - Secret has no bytes
    /// * `UnsupportedAlgorithm` - Identifier is unknown or not an HMAC algorithm
    pub fn new(secret: impl AsRef<[u8]>, algorithm: &str) -> Result<Self, SigningConfigError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(SigningConfigError::EmptySecret);
        }

        let algorithm = match Algorithm::from_str(algorithm) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => {
                return Err(SigningConfigError::UnsupportedAlgorithm(
                    algorithm.to_string(),
                ))
            }
        };

        Ok(Self {
            secret: secret.to_vec(),
            algorithm,
        })
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
