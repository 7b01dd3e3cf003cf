use axum::{
    middleware,
    routing::{get, post},
    Extension, Router,
};

use crate::config::AppState;
use crate::entities::submission::MediaKind;
use crate::handlers::submission_handler::*;
use crate::middleware::{auth_middleware::require_auth, rate_limiter::rate_limit_middleware};

/// Public reads plus owner-gated writes for one media kind.
pub fn submission_routes(state: AppState, kind: MediaKind) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_submissions_handler))
        .route("/{id}", get(get_submission_handler));

    let protected = Router::new()
        .route("/upload", post(upload_submission_handler))
        .route(
            "/{id}",
            axum::routing::put(update_submission_handler).delete(delete_submission_handler),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .layer(middleware::from_fn_with_state(state, rate_limit_middleware));

    public.merge(protected).layer(Extension(kind))
}

/// Admin moderation transitions for one media kind. Auth is layered by the caller.
pub fn moderation_routes(kind: MediaKind) -> Router<AppState> {
    Router::new()
        .route("/{id}/approve", axum::routing::put(approve_submission_handler))
        .route("/{id}/reject", axum::routing::put(reject_submission_handler))
        .route("/{id}/publish", axum::routing::put(publish_submission_handler))
        .route("/{id}/unpublish", axum::routing::put(unpublish_submission_handler))
        .layer(Extension(kind))
}
