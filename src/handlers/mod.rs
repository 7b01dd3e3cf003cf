pub mod admin_handler;
pub mod auth_handler;
pub mod submission_handler;
pub mod tag_handler;

use axum::response::IntoResponse;
use chrono::Utc;

use crate::utils::api_response::ResponseBuilder;

pub async fn health_check_handler() -> impl IntoResponse {
    ResponseBuilder::success(
        "HEALTH_CHECK_SUCCESS",
        "Server is healthy",
        serde_json::json!({
            "status": "up",
            "server_time": Utc::now().to_rfc3339(),
        }),
    )
}
