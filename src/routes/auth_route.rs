use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::config::AppState;
use crate::handlers::auth_handler::*;
use crate::middleware::{auth_middleware::require_auth, rate_limiter::rate_limit_middleware};

pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/send-otp", post(send_otp_handler))
        .route("/verify-otp", post(verify_otp_handler))
        .route("/signup-with-otp", post(signup_with_otp_handler))
        .route("/reset-password", post(reset_password_handler))
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware))
}

pub fn profile_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile_handler))
        .route("/profile/interests", put(update_interests_handler))
        .layer(middleware::from_fn_with_state(state, require_auth))
}
