use std::env;

use auth::SigningConfig;
use auth::SigningConfigError;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub mail: MailConfig,
    pub image_generation: ImageGenerationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Base URL used when building links sent by email.
    pub public_url: String,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

#[derive(Deserialize, Clone)]
pub struct MailConfig {
    #[serde(default = "default_mail_api_url")]
    pub api_url: String,
    pub domain: String,
    pub api_key: String,
}

#[derive(Deserialize, Clone)]
pub struct ImageGenerationConfig {
    #[serde(default = "default_image_api_url")]
    pub api_url: String,
    pub api_key: String,
}

fn default_max_connections() -> u32 {
    5
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_mail_api_url() -> String {
    "https://api.mailgun.net/v3".to_string()
}

fn default_image_api_url() -> String {
    "https://api.deepai.org/api/text2img".to_string()
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment())
            .build()?;

        configuration.try_deserialize()
    }
}

/// Unprefixed variables with `__` between path segments, so `MAIL__API_KEY`
/// overrides `mail.api_key`.
fn environment() -> Environment {
    Environment::default().separator("__").try_parsing(true)
}

impl JwtConfig {
    /// Build the immutable signing configuration shared by token issuance and verification.
    ///
    /// # Errors
    /// * `EmptySecret` - No secret configured
    /// * `UnsupportedAlgorithm` - Algorithm is not one of HS256, HS384, HS512
    pub fn signing_config(&self) -> Result<SigningConfig, SigningConfigError> {
        SigningConfig::new(&self.secret, &self.algorithm)
    }
}

// Secrets stay out of Debug output.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_url", &self.api_url)
            .field("domain", &self.domain)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for ImageGenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGenerationConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
