use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension,
};

use crate::config::AppState;
use crate::models::auth_model::CurrentUser;
use crate::models::tag_model::{CreateTagRequest, TagFilter, TagSearchQuery, UpdateTagRequest};
use crate::utils::api_response::ResponseBuilder;
use crate::utils::app_error::AppResult;
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_tags_handler(
    State(state): State<AppState>,
    Query(filter): Query<TagFilter>,
) -> AppResult<impl IntoResponse> {
    let tags = state.tag_service.list(&filter).await?;
    Ok(ResponseBuilder::success("TAGS_FETCHED", "Tags fetched successfully", tags))
}

pub async fn get_tag_handler(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<impl IntoResponse> {
    let tag = state.tag_service.get(id).await?;
    Ok(ResponseBuilder::success("TAG_FETCHED", "Tag fetched successfully", tag))
}

pub async fn search_tags_handler(
    State(state): State<AppState>,
    Query(query): Query<TagSearchQuery>,
) -> AppResult<impl IntoResponse> {
    let tags = state.tag_service.search(&query.q, query.limit).await?;
    Ok(ResponseBuilder::success("TAGS_FETCHED", "Tags fetched successfully", tags))
}

pub async fn tag_stats_handler(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = state.tag_service.stats().await?;
    Ok(ResponseBuilder::success("TAG_STATS_FETCHED", "Tag statistics fetched successfully", stats))
}

pub async fn create_tag_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateTagRequest>,
) -> AppResult<impl IntoResponse> {
    let tag = state.tag_service.create(&admin.caller(), payload).await?;
    Ok(ResponseBuilder::created("TAG_CREATED", "Tag created successfully", tag))
}

pub async fn update_tag_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateTagRequest>,
) -> AppResult<impl IntoResponse> {
    let tag = state.tag_service.update(&admin.caller(), id, payload).await?;
    Ok(ResponseBuilder::success("TAG_UPDATED", "Tag updated successfully", tag))
}

pub async fn delete_tag_handler(
    State(state): State<AppState>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.tag_service.delete(&admin.caller(), id).await?;
    Ok(ResponseBuilder::message("TAG_DELETED", "Tag deleted successfully"))
}
