use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;

use crate::entities::{
    submission::{self, Entity as Submission, MediaKind, ModerationStatus},
    submission_tag, tag,
};
use crate::models::submission_model::{NewSubmission, SubmissionFilter};
use crate::repositories::SubmissionStore;

#[derive(Clone)]
pub struct SubmissionRepository {
    db: DatabaseConnection,
}

impl SubmissionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubmissionStore for SubmissionRepository {
    async fn insert(&self, new: NewSubmission) -> Result<submission::Model, DbErr> {
        let now = Utc::now();
        let meta = new.metadata;
        submission::ActiveModel {
            id: NotSet,
            kind: Set(new.kind),
            user_id: Set(new.user_id),
            project_title: Set(new.project_title),
            prompt: Set(new.prompt),
            technical_notes: Set(new.technical_notes),
            model_or_tool: Set(new.model_or_tool),
            creator_credit: Set(new.creator_credit),
            media_url: Set(new.media_url),
            media_filename: Set(new.media_filename),
            size_bytes: Set(meta.size_bytes),
            width: Set(meta.width),
            height: Set(meta.height),
            duration_seconds: Set(meta.duration_seconds),
            frame_count: Set(meta.frame_count),
            video_format: Set(meta.video_format),
            fps: Set(meta.fps),
            status: Set(ModerationStatus::Pending),
            verified_by: Set(None),
            verified_at: Set(None),
            rejection_reason: Set(None),
            likes_count: Set(0),
            views_count: Set(0),
            downloads_count: Set(0),
            is_featured: Set(false),
            is_published: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    async fn find(&self, kind: MediaKind, id: i64) -> Result<Option<submission::Model>, DbErr> {
        Submission::find_by_id(id)
            .filter(submission::Column::Kind.eq(kind))
            .one(&self.db)
            .await
    }

    async fn list(&self, kind: MediaKind, filter: &SubmissionFilter) -> Result<Vec<submission::Model>, DbErr> {
        let mut query = Submission::find().filter(submission::Column::Kind.eq(kind));
        if let Some(status) = filter.status {
            query = query.filter(submission::Column::Status.eq(status));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(submission::Column::UserId.eq(user_id));
        }
        if let Some(is_featured) = filter.is_featured {
            query = query.filter(submission::Column::IsFeatured.eq(is_featured));
        }

        query
            .order_by_desc(submission::Column::CreatedAt)
            .order_by_desc(submission::Column::Id)
            .all(&self.db)
            .await
    }

    async fn update(&self, model: submission::Model) -> Result<submission::Model, DbErr> {
        let mut active = model.into_active_model().reset_all();
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await
    }

    async fn delete(&self, id: i64) -> Result<u64, DbErr> {
        // Pivot rows go with it (ON DELETE CASCADE).
        let result = Submission::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn attach_tags(&self, submission_id: i64, tag_ids: &[i64]) -> Result<Vec<tag::Model>, DbErr> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let tags = tag::Entity::find()
            .filter(tag::Column::Id.is_in(tag_ids.to_vec()))
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await?;
        if tags.is_empty() {
            return Ok(tags);
        }

        let links = tags.iter().map(|t| submission_tag::ActiveModel {
            submission_id: Set(submission_id),
            tag_id: Set(t.id),
        });
        submission_tag::Entity::insert_many(links)
            .on_conflict(
                sea_query::OnConflict::columns([
                    submission_tag::Column::SubmissionId,
                    submission_tag::Column::TagId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(&self.db)
            .await?;

        Ok(tags)
    }

    async fn tags_for(&self, submission_ids: &[i64]) -> Result<HashMap<i64, Vec<tag::Model>>, DbErr> {
        let mut grouped: HashMap<i64, Vec<tag::Model>> = HashMap::new();
        if submission_ids.is_empty() {
            return Ok(grouped);
        }

        let rows = submission_tag::Entity::find()
            .filter(submission_tag::Column::SubmissionId.is_in(submission_ids.to_vec()))
            .find_also_related(tag::Entity)
            .all(&self.db)
            .await?;

        for (link, tag) in rows {
            if let Some(tag) = tag {
                grouped.entry(link.submission_id).or_default().push(tag);
            }
        }
        for tags in grouped.values_mut() {
            tags.sort_by(|a, b| a.name.cmp(&b.name));
        }

        Ok(grouped)
    }
}
