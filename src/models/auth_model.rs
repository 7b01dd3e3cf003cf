use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::Caller;
use crate::entities::{otp::OtpPurpose, user};

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    pub full_name: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    pub password: String,
}

/// Token plus the account it was minted for. Returned by register, login
/// and OTP signup.
#[derive(Serialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: user::Model,
}

#[derive(Deserialize, Validate)]
pub struct SendOtpRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub purpose: OtpPurpose,
}

#[derive(Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default, alias = "otp")]
    #[validate(custom(function = "crate::utils::validator_utils::validate_otp_code"))]
    pub code: String,
}

#[derive(Deserialize, Validate)]
pub struct SignupWithOtpRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default, alias = "otp")]
    #[validate(custom(function = "crate::utils::validator_utils::validate_otp_code"))]
    pub code: String,

    #[serde(default)]
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub full_name: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default, alias = "otp")]
    #[validate(custom(function = "crate::utils::validator_utils::validate_otp_code"))]
    pub code: String,

    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Deserialize, Validate)]
pub struct UpdateInterestsRequest {
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub interests: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub email: String,
    pub role: user::UserRole,
    pub exp: usize,
    pub iat: usize,
}

/// Authenticated principal injected by the auth middleware.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: user::UserRole,
}

impl CurrentUser {
    pub fn caller(&self) -> Caller {
        Caller { user_id: self.id, role: self.role }
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            email: claims.email,
            role: claims.role,
        }
    }
}
