use axum::{routing::get, Router};

use crate::config::AppState;
use crate::handlers::tag_handler::*;

pub fn tag_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tags_handler))
        .route("/search", get(search_tags_handler))
        .route("/stats", get(tag_stats_handler))
        .route("/{id}", get(get_tag_handler))
}
