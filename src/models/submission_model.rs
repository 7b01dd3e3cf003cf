use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::{
    submission::{self, MediaKind, ModerationStatus},
    tag,
};

#[derive(Deserialize, Default, Debug, Clone)]
pub struct SubmissionFilter {
    pub status: Option<ModerationStatus>,
    pub user_id: Option<i64>,
    pub is_featured: Option<bool>,
}

/// Optional measurements supplied with an upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaMetadata {
    pub size_bytes: Option<i64>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration_seconds: Option<f64>,
    pub frame_count: Option<i32>,
    pub video_format: Option<String>,
    pub fps: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A parsed upload form, before anything touches storage.
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    pub project_title: String,
    pub prompt: String,
    pub technical_notes: Option<String>,
    pub model_or_tool: Option<String>,
    pub creator_credit: String,
    pub tag_ids: Vec<i64>,
    pub metadata: MediaMetadata,
    pub file: Option<UploadedFile>,
}

/// Row to insert once the payload is stored.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub kind: MediaKind,
    pub user_id: i64,
    pub project_title: String,
    pub prompt: String,
    pub technical_notes: Option<String>,
    pub model_or_tool: Option<String>,
    pub creator_credit: String,
    pub media_url: String,
    pub media_filename: Option<String>,
    pub metadata: MediaMetadata,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateSubmissionRequest {
    #[validate(length(min = 1, max = 100))]
    pub project_title: Option<String>,
    #[validate(length(min = 1))]
    pub prompt: Option<String>,
    pub technical_notes: Option<String>,
    pub model_or_tool: Option<String>,
    #[validate(length(min = 1))]
    pub creator_credit: Option<String>,
    pub is_featured: Option<bool>,
}

#[derive(Deserialize, Default)]
pub struct RejectRequest {
    pub reason: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SubmissionResponse {
    #[serde(flatten)]
    pub submission: submission::Model,
    pub tags: Vec<tag::Model>,
}
