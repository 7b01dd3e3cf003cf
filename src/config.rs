use std::env;
use std::sync::Arc;

use chrono::Duration;

use crate::middleware::rate_limiter::RateLimiter;
use crate::services::{
    auth_service::AuthService, moderation::ModerationPolicy, otp_service::OtpService,
    submission_service::SubmissionService, tag_service::TagDeletePolicy, tag_service::TagService,
    user_service::UserService, CredentialIssuer,
};

const DEFAULT_MAX_UPLOAD_SIZE: usize = 100 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub database_url: String,
    pub db_max_connections: u32,

    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub max_upload_size: usize,
    pub allowed_origins: Vec<String>,

    pub imagekit_private_key: String,
    pub imagekit_upload_folder: String,

    pub s3_access_key: String,
    pub s3_secret_key: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    pub s3_bucket_gif: String,
    pub s3_bucket_video: String,

    pub brevo_api_key: String,
    pub smtp_from: String,
    pub mailpit_url: String,

    pub moderation: ModerationPolicy,
    pub tag_delete_policy: TagDeletePolicy,

    pub admin_username: String,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: Arc<dyn CredentialIssuer>,
    pub auth_service: Arc<AuthService>,
    pub otp_service: Arc<OtpService>,
    pub user_service: Arc<UserService>,
    pub tag_service: Arc<TagService>,
    pub submission_service: Arc<SubmissionService>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let or = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let config = Config {
            server_host: or("HOST", "0.0.0.0"),
            server_port: parse_or(&get, "PORT", 8080)?,
            environment: or("ENV", "development"),
            database_url: required("DATABASE_URL")?,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,

            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration_hours: parse_or(&get, "JWT_EXPIRATION_HOURS", 24)?,
            max_upload_size: parse_or(&get, "MAX_UPLOAD_SIZE", DEFAULT_MAX_UPLOAD_SIZE)?,
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),

            imagekit_private_key: or("IMAGEKIT_PRIVATE_KEY", ""),
            imagekit_upload_folder: or("IMAGEKIT_UPLOAD_FOLDER", "/gallery"),

            s3_access_key: or("S3_ACCESS_KEY", ""),
            s3_secret_key: or("S3_SECRET_KEY", ""),
            s3_endpoint: or("S3_ENDPOINT", ""),
            s3_region: or("S3_REGION", "us-east-1"),
            s3_bucket_gif: or("S3_BUCKET_GIF", ""),
            s3_bucket_video: or("S3_BUCKET_VIDEO", ""),

            brevo_api_key: or("BREVO_API_KEY", ""),
            smtp_from: or("SMTP_FROM", "noreply@promptgallery.dev"),
            mailpit_url: or("MAILPIT_URL", "http://localhost:8025"),

            moderation: ModerationPolicy {
                stamp_all_kinds: parse_or(&get, "MODERATION_STAMP_ALL_KINDS", false)?,
                reject_unpublishes: parse_or(&get, "MODERATION_REJECT_UNPUBLISHES", false)?,
            },
            tag_delete_policy: parse_or(&get, "TAG_DELETE_POLICY", TagDeletePolicy::default())?,

            admin_username: or("ADMIN_USERNAME", "admin"),
            admin_email: get("ADMIN_EMAIL"),
            admin_password: get("ADMIN_PASSWORD"),
        };

        for warning in config.storage_warnings() {
            tracing::warn!("{}", warning);
        }

        Ok(config)
    }

    /// One entry per storage backend that will refuse uploads. Logged once,
    /// at load.
    pub fn storage_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if self.imagekit_private_key.is_empty() {
            warnings.push("IMAGEKIT_PRIVATE_KEY not set; image uploads will fail");
        }
        if !self.s3_configured() {
            warnings.push("S3 credentials not set; GIF and video uploads will fail");
        }
        warnings
    }

    pub fn s3_configured(&self) -> bool {
        !self.s3_access_key.is_empty() && !self.s3_secret_key.is_empty() && !self.s3_endpoint.is_empty()
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.jwt_expiration_hours)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    #[cfg(test)]
    pub fn for_tests() -> Config {
        Self::from_lookup(|name| match name {
            "DATABASE_URL" => Some("postgres://localhost/test".into()),
            "JWT_SECRET" => Some("test-secret".into()),
            _ => None,
        })
        .unwrap()
    }
}

fn parse_or<T: std::str::FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
    }
}
