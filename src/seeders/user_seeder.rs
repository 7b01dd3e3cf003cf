use crate::config::Config;
use crate::entities::user::UserRole;
use crate::repositories::{NewUser, UserStore};
use crate::services::{dependency_error, CredentialIssuer};
use crate::utils::app_error::AppResult;

/// Creates the bootstrap admin when `ADMIN_EMAIL` and `ADMIN_PASSWORD` are
/// set and no account uses that email yet.
pub async fn seed_admin(
    config: &Config,
    users: &dyn UserStore,
    credentials: &dyn CredentialIssuer,
) -> AppResult<bool> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        tracing::debug!("admin credentials not configured; skipping admin seed");
        return Ok(false);
    };

    if users.find_by_email(email).await?.is_some() {
        return Ok(false);
    }

    let password_hash = credentials
        .hash(password)
        .map_err(dependency_error("HASH_ERR", "Failed to hash admin password"))?;

    let admin = users
        .create(NewUser {
            username: config.admin_username.clone(),
            email: email.clone(),
            password_hash,
            full_name: Some("Administrator".to_string()),
            role: UserRole::Admin,
            email_verified: true,
        })
        .await?;

    tracing::info!(user_id = admin.id, email = %admin.email, "seeded admin account");
    Ok(true)
}
