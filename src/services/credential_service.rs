use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

use crate::entities::user::UserRole;
use crate::models::auth_model::Claims;
use crate::services::{BoxError, CredentialIssuer};
use crate::utils::jwt_utils::JwtUtils;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token signature")]
    BadSignature,
    #[error("Token is invalid")]
    Invalid,
}

impl TokenError {
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => "TOKEN_EXPIRED",
            TokenError::BadSignature => "TOKEN_BAD_SIGNATURE",
            TokenError::Invalid => "TOKEN_INVALID",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::BadSignature,
            _ => TokenError::Invalid,
        }
    }
}

/// Argon2 password hashes and HS256 JWTs.
pub struct CredentialService {
    jwt_secret: String,
    token_ttl: Duration,
}

impl CredentialService {
    pub fn new(jwt_secret: String, token_ttl: Duration) -> Self {
        Self { jwt_secret, token_ttl }
    }
}

impl CredentialIssuer for CredentialService {
    fn hash(&self, password: &str) -> Result<String, BoxError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| format!("Failed to hash password: {}", e))?;
        Ok(hash.to_string())
    }

    fn verify(&self, credential: &str, password: &str) -> Result<bool, BoxError> {
        let parsed = PasswordHash::new(credential).map_err(|e| format!("Malformed password hash: {}", e))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn issue_token(&self, user_id: i64, username: &str, email: &str, role: UserRole) -> Result<String, BoxError> {
        let token = JwtUtils::generate_jwt(&self.jwt_secret, self.token_ttl, user_id, username, email, role)?;
        Ok(token)
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let data = JwtUtils::validate_jwt(&self.jwt_secret, token)?;
        Ok(data.claims)
    }
}
