use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};

use crate::config::AppState;
use crate::entities::user::UserRole;
use crate::models::auth_model::CurrentUser;
use crate::services::CredentialIssuer;
use crate::utils::app_error::{AppError, AppResult};

/// Resolves the bearer token into a [`CurrentUser`] request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> AppResult<Response> {
    let current_user = authenticate(state.credentials.as_ref(), req.headers())?;
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// Must be layered inside [`require_auth`].
pub async fn require_admin(req: Request<Body>, next: Next) -> AppResult<Response> {
    let current_user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| AppError::unauthorized("AUTH_MISSING", "Authorization header is missing"))?;

    if current_user.role != UserRole::Admin {
        tracing::warn!(user_id = current_user.id, path = %req.uri().path(), "admin route denied");
        return Err(AppError::forbidden(
            "ACCESS_DENIED",
            "You do not have permission to access this resource",
        ));
    }
    Ok(next.run(req).await)
}

pub fn authenticate(credentials: &dyn CredentialIssuer, headers: &HeaderMap) -> AppResult<CurrentUser> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| AppError::unauthorized("AUTH_MISSING", "Authorization header is missing"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::unauthorized("AUTH_INVALID_FORMAT", "Invalid Authorization header format"))?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::unauthorized("AUTH_INVALID_SCHEME", "Invalid token format. Missing 'Bearer ' prefix")
    })?;

    let claims = credentials
        .decode(token.trim())
        .map_err(|e| AppError::unauthorized(e.code(), e.to_string()))?;

    Ok(CurrentUser::from(claims))
}
