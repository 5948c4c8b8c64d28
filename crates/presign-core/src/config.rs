//! Configuration module
//!
//! Process-wide settings are read once at startup and never mutated afterwards. The
//! resulting `Config` is passed explicitly into every component that needs it.

use std::env;
use std::fmt;

const SERVER_PORT: u16 = 4000;
const DEFAULT_REGION: &str = "us-east-1";

/// Base configuration shared by every deployment
#[derive(Clone)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_allowed_origin: String,
    pub jwt_secret: String,
    pub environment: String,
}

impl fmt::Debug for BaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseConfig")
            .field("server_port", &self.server_port)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .field("jwt_secret", &"<redacted>")
            .field("environment", &self.environment)
            .finish()
    }
}

/// Presign service configuration
#[derive(Clone, Debug)]
pub struct PresignConfig {
    pub base: BaseConfig,
    // Storage configuration
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers
    pub kms_key_id: String,
    // Token handling
    pub allow_anonymous: bool,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<PresignConfig>);

impl Config {
    fn as_presign(&self) -> &PresignConfig {
        &self.0
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = PresignConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_presign().validate()
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production(&self.as_presign().base.environment)
    }

    pub fn server_port(&self) -> u16 {
        self.as_presign().base.server_port
    }

    pub fn jwt_secret(&self) -> &[u8] {
        self.as_presign().base.jwt_secret.as_bytes()
    }

    pub fn cors_allowed_origin(&self) -> &str {
        &self.as_presign().base.cors_allowed_origin
    }

    pub fn environment(&self) -> &str {
        &self.as_presign().base.environment
    }

    pub fn s3_bucket(&self) -> &str {
        &self.as_presign().s3_bucket
    }

    pub fn s3_region(&self) -> &str {
        &self.as_presign().s3_region
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_presign().s3_endpoint.as_deref()
    }

    pub fn kms_key_id(&self) -> &str {
        &self.as_presign().kms_key_id
    }

    pub fn allow_anonymous(&self) -> bool {
        self.as_presign().allow_anonymous
    }
}

fn is_production(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .map(|v| v.trim().to_lowercase())
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl PresignConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let base = BaseConfig {
            server_port: match var("PORT") {
                Some(port) => port
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
                None => SERVER_PORT,
            },
            cors_allowed_origin: var("CORS_ALLOWED_ORIGIN")
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| "*".to_string()),
            jwt_secret: var("JWT_SECRET")
                .or_else(|| var("SUPABASE_JWT_SECRET"))
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            environment,
        };

        let config = PresignConfig {
            base,
            s3_bucket: var("S3_BUCKET")
                .ok_or_else(|| anyhow::anyhow!("S3_BUCKET must be set"))?,
            s3_region: var("S3_REGION")
                .or_else(|| var("AWS_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            s3_endpoint: var("S3_ENDPOINT").filter(|s| !s.is_empty()),
            kms_key_id: var("KMS_KEY_ID")
                .or_else(|| var("KMS_KEY_ARN"))
                .ok_or_else(|| anyhow::anyhow!("KMS_KEY_ID must be set for server-side encryption"))?,
            allow_anonymous: parse_bool(var("ALLOW_ANON"), false),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }

        if self.s3_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_BUCKET must not be empty"));
        }

        if self.kms_key_id.trim().is_empty() {
            return Err(anyhow::anyhow!("KMS_KEY_ID must not be empty"));
        }

        if self.base.cors_allowed_origin.is_empty() {
            return Err(anyhow::anyhow!("CORS_ALLOWED_ORIGIN must not be empty"));
        }

        if is_production(&self.base.environment) && self.base.cors_allowed_origin == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ALLOWED_ORIGIN cannot be '*' in production. Please specify an explicit origin."
            ));
        }

        Ok(())
    }
}
