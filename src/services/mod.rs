pub mod auth_service;
pub mod credential_service;
pub mod email_service;
pub mod imagekit_service;
pub mod media_storage;
pub mod moderation;
pub mod otp_service;
pub mod s3_service;
pub mod submission_service;
pub mod tag_service;
pub mod user_service;

use std::time::Duration;

use async_trait::async_trait;

use crate::entities::user::UserRole;
use crate::models::auth_model::Claims;
use crate::services::credential_service::TokenError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Password hashing and bearer-token minting.
pub trait CredentialIssuer: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, BoxError>;
    fn verify(&self, credential: &str, password: &str) -> Result<bool, BoxError>;
    fn issue_token(&self, user_id: i64, username: &str, email: &str, role: UserRole) -> Result<String, BoxError>;
    fn decode(&self, token: &str) -> Result<Claims, TokenError>;
}

/// S3-compatible bucket addressed by the public object URL.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put(&self, bytes: Vec<u8>, content_type: &str, path: &str) -> Result<String, BoxError>;
    async fn delete(&self, url: &str) -> Result<(), BoxError>;
    async fn presign_get(&self, url: &str, ttl: Duration) -> Result<String, BoxError>;
}

#[async_trait]
pub trait ImageCdn: Send + Sync {
    /// Returns the secure delivery URL.
    async fn put(&self, bytes: Vec<u8>, filename: &str) -> Result<String, BoxError>;
    async fn delete(&self, public_id: &str) -> Result<(), BoxError>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), BoxError>;
}

/// Logs a collaborator failure and turns it into an opaque internal error.
pub(crate) fn dependency_error(
    code: &'static str,
    message: &'static str,
) -> impl FnOnce(BoxError) -> crate::utils::app_error::AppError {
    move |err| {
        tracing::error!(error = %err, code, "{}", message);
        crate::utils::app_error::AppError::internal(code, message)
    }
}
