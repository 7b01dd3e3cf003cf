use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Which gallery a submission belongs to. Images go to the CDN, GIFs and
/// videos each get their own object-storage bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[sea_orm(string_value = "image")]
    Image,
    #[sea_orm(string_value = "gif")]
    Gif,
    #[sea_orm(string_value = "video")]
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Gif => "gif",
            MediaKind::Video => "video",
        }
    }

    /// Plural path segment, e.g. `/gifs`.
    pub fn route_segment(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Gif => "gifs",
            MediaKind::Video => "videos",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Gif => "GIF",
            MediaKind::Video => "Video",
        }
    }

    /// Multipart field carrying the binary payload.
    pub fn file_field(&self) -> &'static str {
        self.as_str()
    }

    pub fn accepts(&self, content_type: &str) -> bool {
        match self {
            MediaKind::Image => content_type.starts_with("image/"),
            MediaKind::Gif => content_type == "image/gif",
            MediaKind::Video => content_type.starts_with("video/"),
        }
    }

    pub fn is_bucket_backed(&self) -> bool {
        !matches!(self, MediaKind::Image)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub kind: MediaKind,
    pub user_id: i64,

    pub project_title: String,
    #[sea_orm(column_type = "Text")]
    pub prompt: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub technical_notes: Option<String>,
    pub model_or_tool: Option<String>,
    pub creator_credit: String,

    pub media_url: String,
    pub media_filename: Option<String>,

    // Technical metadata, all optional
    pub size_bytes: Option<i64>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration_seconds: Option<f64>,
    pub frame_count: Option<i32>,
    pub video_format: Option<String>,
    pub fps: Option<f64>,

    pub status: ModerationStatus,
    pub verified_by: Option<i64>,
    pub verified_at: Option<DateTimeUtc>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,

    pub likes_count: i32,
    pub views_count: i32,
    pub downloads_count: i32,
    pub is_featured: bool,
    pub is_published: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    User,
    #[sea_orm(has_many = "super::submission_tag::Entity")]
    SubmissionTag,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::submission_tag::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::submission_tag::Relation::Submission.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
