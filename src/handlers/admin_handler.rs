use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};

use crate::config::AppState;
use crate::models::admin_model::{UpdateUserStatusRequest, UserFilter};
use crate::models::auth_model::CurrentUser;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::app_error::AppResult;

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Query(filter): Query<UserFilter>,
) -> AppResult<impl IntoResponse> {
    let users = state.user_service.list(&admin.caller(), &filter).await?;
    Ok(ResponseBuilder::success("USERS_FETCHED", "Users fetched successfully", users))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let user = state.user_service.get(&admin.caller(), id).await?;
    Ok(ResponseBuilder::success("USER_FETCHED", "User fetched successfully", user))
}

pub async fn update_user_status_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let user = state
        .user_service
        .update_status(&admin.caller(), id, payload.is_active)
        .await?;
    Ok(ResponseBuilder::success("USER_STATUS_UPDATED", "User status updated successfully", user))
}

pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.user_service.delete(&admin.caller(), id).await?;
    Ok(ResponseBuilder::message("USER_DELETED", "User deleted successfully"))
}

pub async fn user_stats_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let stats = state.user_service.stats(&admin.caller()).await?;
    Ok(ResponseBuilder::success("USER_STATS_FETCHED", "User statistics fetched successfully", stats))
}
