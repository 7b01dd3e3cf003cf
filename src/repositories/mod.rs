//! Persistence seams. Services depend on these traits; the SeaORM
//! repositories implement them against Postgres and `crate::testing` has
//! in-memory versions.

pub mod otp_repository;
pub mod submission_repository;
pub mod tag_repository;
pub mod user_repository;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::entities::{
    otp::{self, OtpPurpose},
    submission::{self, MediaKind},
    tag,
    user::{self, UserRole},
};
use crate::models::{
    admin_model::{UserFilter, UserStats},
    submission_model::{NewSubmission, SubmissionFilter},
    tag_model::{TagFilter, TagStats},
};

/// Write failure with the constraint violations callers react to split out
/// of the generic database error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    Duplicate(String),
    #[error("row is still referenced: {0}")]
    Referenced(String),
    #[error(transparent)]
    Db(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => StoreError::Duplicate(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => StoreError::Referenced(detail),
            _ => StoreError::Db(err),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: UserRole,
    pub email_verified: bool,
}

#[derive(Debug, Clone)]
pub struct NewOtp {
    pub email: String,
    pub code: String,
    pub purpose: OtpPurpose,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub category: tag::TagCategory,
    pub description: Option<String>,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, DbErr>;
    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr>;
    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr>;
    /// New accounts start active. Username and email are unique.
    async fn create(&self, new_user: NewUser) -> Result<user::Model, StoreError>;
    /// Persists every column of `model`; `updated_at` is refreshed.
    async fn update(&self, model: user::Model) -> Result<user::Model, DbErr>;
    async fn list(&self, filter: &UserFilter) -> Result<Vec<user::Model>, DbErr>;
    /// Refused with `StoreError::Referenced` while the user owns submissions.
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;
    async fn stats(&self) -> Result<UserStats, DbErr>;
}

#[async_trait]
pub trait OtpStore: Send + Sync {
    async fn delete_unverified(&self, email: &str, purpose: OtpPurpose) -> Result<u64, DbErr>;
    async fn insert(&self, new_otp: NewOtp) -> Result<otp::Model, DbErr>;
    /// Most recently created unverified record for (email, code), any purpose.
    async fn latest_unverified(&self, email: &str, code: &str) -> Result<Option<otp::Model>, DbErr>;
    async fn latest_verified(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<otp::Model>, DbErr>;
    async fn mark_verified(&self, id: i64) -> Result<(), DbErr>;
    async fn delete(&self, id: i64) -> Result<(), DbErr>;
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, new_submission: NewSubmission) -> Result<submission::Model, DbErr>;
    async fn find(&self, kind: MediaKind, id: i64) -> Result<Option<submission::Model>, DbErr>;
    /// Newest first.
    async fn list(&self, kind: MediaKind, filter: &SubmissionFilter) -> Result<Vec<submission::Model>, DbErr>;
    async fn update(&self, model: submission::Model) -> Result<submission::Model, DbErr>;
    async fn delete(&self, id: i64) -> Result<u64, DbErr>;
    /// Links the ids that name existing tags and returns those tags.
    async fn attach_tags(&self, submission_id: i64, tag_ids: &[i64]) -> Result<Vec<tag::Model>, DbErr>;
    async fn tags_for(&self, submission_ids: &[i64]) -> Result<HashMap<i64, Vec<tag::Model>>, DbErr>;
}

#[async_trait]
pub trait TagStore: Send + Sync {
    /// Ordered by usage count (desc) then name (asc).
    async fn list(&self, filter: &TagFilter) -> Result<Vec<tag::Model>, DbErr>;
    async fn find(&self, id: i64) -> Result<Option<tag::Model>, DbErr>;
    async fn find_by_name(&self, name: &str) -> Result<Option<tag::Model>, DbErr>;
    /// Tag names are unique.
    async fn insert(&self, new_tag: NewTag) -> Result<tag::Model, StoreError>;
    async fn update(&self, model: tag::Model) -> Result<tag::Model, StoreError>;
    async fn delete(&self, id: i64) -> Result<u64, DbErr>;
    /// Substring match on the name, exact case.
    async fn search(&self, query: &str, limit: u64) -> Result<Vec<tag::Model>, DbErr>;
    /// How many submissions link this tag.
    async fn reference_count(&self, id: i64) -> Result<u64, DbErr>;
    async fn stats(&self) -> Result<TagStats, DbErr>;
}
