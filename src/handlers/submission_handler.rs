use axum::{
    extract::{Multipart, Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};

use crate::config::AppState;
use crate::entities::submission::MediaKind;
use crate::models::auth_model::CurrentUser;
use crate::models::submission_model::{
    RejectRequest, SubmissionDraft, SubmissionFilter, UpdateSubmissionRequest, UploadedFile,
};
use crate::services::moderation::Transition;
use crate::utils::api_response::ResponseBuilder;
use crate::utils::app_error::{AppError, AppResult};
use crate::utils::validated_wrapper::ValidatedJson;

pub async fn list_submissions_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Query(filter): Query<SubmissionFilter>,
) -> AppResult<impl IntoResponse> {
    let items = state.submission_service.list(kind, &filter).await?;
    Ok(ResponseBuilder::success(
        "SUBMISSIONS_FETCHED",
        &format!("{} submissions fetched successfully", kind.label()),
        items,
    ))
}

pub async fn get_submission_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let item = state.submission_service.get(kind, id).await?;
    Ok(ResponseBuilder::success("SUBMISSION_FETCHED", "Submission fetched successfully", item))
}

pub async fn upload_submission_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Extension(user): Extension<CurrentUser>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let draft = read_draft(kind, multipart).await?;
    let item = state.submission_service.create(&user.caller(), kind, draft).await?;
    Ok(ResponseBuilder::created(
        "SUBMISSION_CREATED",
        &format!("{} uploaded successfully and is pending review", kind.label()),
        item,
    ))
}

pub async fn update_submission_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateSubmissionRequest>,
) -> AppResult<impl IntoResponse> {
    let item = state.submission_service.update(&user.caller(), kind, id, payload).await?;
    Ok(ResponseBuilder::success("SUBMISSION_UPDATED", "Submission updated successfully", item))
}

pub async fn delete_submission_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.submission_service.delete(&user.caller(), kind, id).await?;
    Ok(ResponseBuilder::message(
        "SUBMISSION_DELETED",
        &format!("{} deleted successfully", kind.label()),
    ))
}

async fn transition(
    state: AppState,
    kind: MediaKind,
    admin: CurrentUser,
    id: i64,
    transition: Transition,
    code: &'static str,
) -> AppResult<impl IntoResponse> {
    let verb = transition.verb();
    let item = state
        .submission_service
        .moderate(&admin.caller(), kind, id, transition)
        .await?;
    Ok(ResponseBuilder::success(
        code,
        &format!("{} {} successfully", kind.label(), verb),
        item,
    ))
}

pub async fn approve_submission_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    transition(state, kind, admin, id, Transition::Approve, "SUBMISSION_APPROVED").await
}

/// The body is optional; a missing or empty body rejects without a reason.
pub async fn reject_submission_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
    payload: Option<Json<RejectRequest>>,
) -> AppResult<impl IntoResponse> {
    let reason = payload
        .and_then(|Json(req)| req.reason)
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty());
    transition(state, kind, admin, id, Transition::Reject { reason }, "SUBMISSION_REJECTED").await
}

pub async fn publish_submission_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    transition(state, kind, admin, id, Transition::Publish, "SUBMISSION_PUBLISHED").await
}

pub async fn unpublish_submission_handler(
    State(state): State<AppState>,
    Extension(kind): Extension<MediaKind>,
    Extension(admin): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    transition(state, kind, admin, id, Transition::Unpublish, "SUBMISSION_UNPUBLISHED").await
}

fn malformed(e: impl std::fmt::Display) -> AppError {
    AppError::bad_request("INVALID_FORM", format!("Malformed multipart body: {}", e))
}

/// Collects the upload form. Presence and type checks happen in the service
/// so that every entry point validates the same way.
pub async fn read_draft(kind: MediaKind, mut multipart: Multipart) -> AppResult<SubmissionDraft> {
    let mut draft = SubmissionDraft::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == kind.file_field() {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(malformed)?.to_vec();
            draft.file = Some(UploadedFile { filename, content_type, bytes });
            continue;
        }
        let value = field.text().await.map_err(malformed)?;
        apply_text_field(&mut draft, &name, value);
    }

    Ok(draft)
}

/// Unknown fields and unparseable metadata are ignored.
pub fn apply_text_field(draft: &mut SubmissionDraft, name: &str, value: String) {
    let trimmed = value.trim();
    let optional = || Some(trimmed.to_string()).filter(|v| !v.is_empty());
    let meta = &mut draft.metadata;

    match name {
        "project_title" => draft.project_title = trimmed.to_string(),
        "prompt" => draft.prompt = trimmed.to_string(),
        "creator_credit" => draft.creator_credit = trimmed.to_string(),
        "technical_notes" => draft.technical_notes = optional(),
        "model_or_tool" => draft.model_or_tool = optional(),
        "tags" => draft.tag_ids = parse_tag_ids(trimmed),
        "width" => meta.width = trimmed.parse().ok(),
        "height" => meta.height = trimmed.parse().ok(),
        "duration_seconds" => meta.duration_seconds = trimmed.parse().ok(),
        "frame_count" => meta.frame_count = trimmed.parse().ok(),
        "fps" => meta.fps = trimmed.parse().ok(),
        "video_format" => meta.video_format = optional(),
        _ => tracing::debug!(field = name, "ignoring unknown form field"),
    }
}

pub fn parse_tag_ids(raw: &str) -> Vec<i64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .filter(|id| *id > 0)
        .collect()
}
