use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::config::AppState;
use crate::entities::submission::MediaKind;
use crate::handlers::{admin_handler::*, tag_handler::*};
use crate::middleware::auth_middleware::{require_admin, require_auth};
use crate::routes::submission_route::moderation_routes;

pub fn admin_routes(state: AppState) -> Router<AppState> {
    let mut router = Router::new()
        .route("/users", get(list_users_handler))
        .route("/users/stats", get(user_stats_handler))
        .route("/users/{id}", get(get_user_handler).delete(delete_user_handler))
        .route("/users/{id}/status", put(update_user_status_handler))
        .route("/tags", post(create_tag_handler))
        .route("/tags/{id}", put(update_tag_handler).delete(delete_tag_handler));

    for kind in [MediaKind::Image, MediaKind::Gif, MediaKind::Video] {
        router = router.nest(&format!("/{}", kind.route_segment()), moderation_routes(kind));
    }

    router
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state, require_auth))
}
