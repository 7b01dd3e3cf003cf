use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{AppState, Config};
use crate::entities::submission::MediaKind;
use crate::handlers::health_check_handler;

pub mod admin_route;
pub mod auth_route;
pub mod submission_route;
pub mod tag_route;

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_origin(allow_origin)
        .allow_headers(Any)
}

pub fn create_routes(state: AppState) -> Router<AppState> {
    let mut api = Router::new()
        .nest("/auth", auth_route::auth_routes(state.clone()))
        .nest("/tags", tag_route::tag_routes())
        .nest("/admin", admin_route::admin_routes(state.clone()))
        .merge(auth_route::profile_routes(state.clone()))
        .route("/health", get(health_check_handler));

    for kind in [MediaKind::Image, MediaKind::Gif, MediaKind::Video] {
        api = api.nest(
            &format!("/{}", kind.route_segment()),
            submission_route::submission_routes(state.clone(), kind),
        );
    }

    Router::new()
        .nest("/api/v1", api)
        .layer(DefaultBodyLimit::max(state.config.max_upload_size))
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
}
