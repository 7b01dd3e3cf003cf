use std::sync::Arc;

use chrono::Utc;

use crate::auth::Caller;
use crate::entities::user::{self, UserRole};
use crate::models::auth_model::{AuthResponse, LoginRequest, RegisterRequest};
use crate::repositories::{NewUser, UserStore};
use crate::services::{dependency_error, CredentialIssuer};
use crate::utils::app_error::{AppError, AppResult};

pub(crate) const IDENTITY_TAKEN: &str = "USERNAME_OR_EMAIL_TAKEN";
pub(crate) const IDENTITY_TAKEN_MESSAGE: &str = "Username or email already exists";

/// Username is checked before email, so a request clashing on both reports
/// the username.
pub(crate) async fn ensure_identity_available(
    users: &dyn UserStore,
    username: &str,
    email: &str,
) -> AppResult<()> {
    if users.find_by_username(username).await?.is_some() {
        return Err(AppError::conflict("USERNAME_TAKEN", "Username is already taken"));
    }
    if users.find_by_email(email).await?.is_some() {
        return Err(AppError::conflict("EMAIL_TAKEN", "Email is already registered"));
    }
    Ok(())
}

pub(crate) fn token_for(credentials: &dyn CredentialIssuer, user: &user::Model) -> AppResult<String> {
    credentials
        .issue_token(user.id, &user.username, &user.email, user.role)
        .map_err(dependency_error("JWT_ERR", "Token generation failed"))
}

pub struct AuthService {
    users: Arc<dyn UserStore>,
    credentials: Arc<dyn CredentialIssuer>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, credentials: Arc<dyn CredentialIssuer>) -> Self {
        Self { users, credentials }
    }

    pub async fn register(&self, req: RegisterRequest) -> AppResult<AuthResponse> {
        ensure_identity_available(self.users.as_ref(), &req.username, &req.email).await?;

        let password_hash = self
            .credentials
            .hash(&req.password)
            .map_err(dependency_error("HASH_ERR", "Failed to hash password"))?;

        let user = self
            .users
            .create(NewUser {
                username: req.username,
                email: req.email,
                password_hash,
                full_name: req.full_name,
                role: UserRole::User,
                email_verified: false,
            })
            .await
            .map_err(AppError::on_duplicate(IDENTITY_TAKEN, IDENTITY_TAKEN_MESSAGE))?;
        tracing::info!(user_id = user.id, username = %user.username, "user registered");

        let token = token_for(self.credentials.as_ref(), &user)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn login(&self, req: LoginRequest) -> AppResult<AuthResponse> {
        let invalid = || AppError::unauthorized("AUTH_FAILED", "Invalid email or password");

        let mut user = self.users.find_by_email(&req.email).await?.ok_or_else(invalid)?;

        let matches = self
            .credentials
            .verify(&user.password_hash, &req.password)
            .map_err(dependency_error("HASH_ERR", "Password verification failed"))?;
        if !matches {
            tracing::warn!(user_id = user.id, "login rejected: bad password");
            return Err(invalid());
        }

        if !user.is_active {
            return Err(AppError::forbidden("ACCOUNT_INACTIVE", "Account is deactivated"));
        }

        user.last_login = Some(Utc::now());
        let user = self.users.update(user).await?;

        let token = token_for(self.credentials.as_ref(), &user)?;
        Ok(AuthResponse { token, user })
    }

    pub async fn profile(&self, caller: &Caller) -> AppResult<user::Model> {
        self.users
            .find_by_id(caller.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", "User not found"))
    }

    pub async fn update_interests(&self, caller: &Caller, interests: String) -> AppResult<user::Model> {
        let mut user = self.profile(caller).await?;
        user.interests = Some(interests);
        Ok(self.users.update(user).await?)
    }
}
