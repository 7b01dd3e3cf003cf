use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::auth::Caller;
use crate::entities::{
    submission::{self, MediaKind},
    tag,
};
use crate::models::submission_model::{
    NewSubmission, SubmissionDraft, SubmissionFilter, SubmissionResponse, UpdateSubmissionRequest,
};
use crate::repositories::SubmissionStore;
use crate::services::dependency_error;
use crate::services::media_storage::MediaStorage;
use crate::services::moderation::{moderate, Moderated, ModerationPolicy, Transition};
use crate::utils::app_error::{AppError, AppResult};

/// Upload, read, edit, delete and moderate submissions of every kind.
pub struct SubmissionService {
    submissions: Arc<dyn SubmissionStore>,
    storage: MediaStorage,
    policy: ModerationPolicy,
}

impl SubmissionService {
    pub fn new(submissions: Arc<dyn SubmissionStore>, storage: MediaStorage, policy: ModerationPolicy) -> Self {
        Self { submissions, storage, policy }
    }

    /// Stores the payload first, then inserts the row. When the insert fails
    /// the stored object is discarded once.
    pub async fn create(
        &self,
        caller: &Caller,
        kind: MediaKind,
        draft: SubmissionDraft,
    ) -> AppResult<SubmissionResponse> {
        let Some(file) = draft.file else {
            return Err(AppError::bad_request(
                "MISSING_FILE",
                format!("No {} file provided", kind.as_str()),
            ));
        };
        if !kind.accepts(&file.content_type) {
            return Err(AppError::bad_request(
                "INVALID_FILE_TYPE",
                format!("File must be a {}", kind.label()),
            ));
        }
        if [&draft.project_title, &draft.prompt, &draft.creator_credit]
            .iter()
            .any(|v| v.trim().is_empty())
        {
            return Err(AppError::bad_request(
                "MISSING_FIELDS",
                "project_title, prompt and creator_credit are required",
            ));
        }

        let mut metadata = draft.metadata;
        metadata.size_bytes = Some(file.bytes.len() as i64);

        let stored = self
            .storage
            .store(kind, file)
            .await
            .map_err(dependency_error("UPLOAD_FAILED", "Failed to upload file"))?;

        let inserted = self
            .submissions
            .insert(NewSubmission {
                kind,
                user_id: caller.user_id,
                project_title: draft.project_title,
                prompt: draft.prompt,
                technical_notes: draft.technical_notes,
                model_or_tool: draft.model_or_tool,
                creator_credit: draft.creator_credit,
                media_url: stored.url.clone(),
                media_filename: Some(stored.filename),
                metadata,
            })
            .await;

        let record = match inserted {
            Ok(record) => record,
            Err(err) => {
                tracing::error!(kind = kind.as_str(), error = %err, "insert failed; discarding upload");
                if let Err(cleanup) = self.storage.discard(kind, &stored.url).await {
                    tracing::error!(kind = kind.as_str(), url = %stored.url, error = %cleanup, "orphaned upload");
                }
                return Err(AppError::internal("SAVE_FAILED", format!("Failed to save {} submission", kind.as_str())));
            }
        };

        // Unknown ids are skipped; a failure here leaves an untagged submission.
        let tags = match self.submissions.attach_tags(record.id, &draft.tag_ids).await {
            Ok(tags) => tags,
            Err(err) => {
                tracing::warn!(submission_id = record.id, error = %err, "attaching tags failed");
                Vec::new()
            }
        };

        tracing::info!(submission_id = record.id, kind = kind.as_str(), user_id = caller.user_id, "submission created");
        Ok(self.present(record, tags).await)
    }

    pub async fn list(&self, kind: MediaKind, filter: &SubmissionFilter) -> AppResult<Vec<SubmissionResponse>> {
        let records = self.submissions.list(kind, filter).await?;
        let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
        let mut tags = self.submissions.tags_for(&ids).await?;

        let mut out = Vec::with_capacity(records.len());
        for record in records {
            let record_tags = tags.remove(&record.id).unwrap_or_default();
            out.push(self.present(record, record_tags).await);
        }
        Ok(out)
    }

    pub async fn get(&self, kind: MediaKind, id: i64) -> AppResult<SubmissionResponse> {
        let record = self.find(kind, id).await?;
        let tags = self.tags_of(record.id).await?;
        Ok(self.present(record, tags).await)
    }

    /// Partial update by the owner or an admin. `is_featured` is only
    /// honoured for admins.
    pub async fn update(
        &self,
        caller: &Caller,
        kind: MediaKind,
        id: i64,
        req: UpdateSubmissionRequest,
    ) -> AppResult<SubmissionResponse> {
        let mut record = self.find(kind, id).await?;
        caller.ensure_owner_or_admin(record.owner_id())?;

        if let Some(v) = req.project_title {
            record.project_title = v;
        }
        if let Some(v) = req.prompt {
            record.prompt = v;
        }
        if let Some(v) = req.technical_notes {
            record.technical_notes = Some(v);
        }
        if let Some(v) = req.model_or_tool {
            record.model_or_tool = Some(v);
        }
        if let Some(v) = req.creator_credit {
            record.creator_credit = v;
        }
        if let Some(featured) = req.is_featured {
            if caller.is_admin() {
                record.is_featured = featured;
            } else {
                tracing::debug!(submission_id = id, user_id = caller.user_id, "ignoring is_featured from non-admin");
            }
        }

        let record = self.submissions.update(record).await?;
        let tags = self.tags_of(record.id).await?;
        Ok(self.present(record, tags).await)
    }

    /// Removes the stored object (best effort) and then the row.
    pub async fn delete(&self, caller: &Caller, kind: MediaKind, id: i64) -> AppResult<()> {
        let record = self.find(kind, id).await?;
        caller.ensure_owner_or_admin(record.owner_id())?;

        if let Err(err) = self.storage.discard(kind, record.storage_url()).await {
            tracing::warn!(submission_id = id, kind = kind.as_str(), error = %err, "storage delete failed");
        }

        self.submissions.delete(id).await?;
        tracing::info!(submission_id = id, kind = kind.as_str(), user_id = caller.user_id, "submission deleted");
        Ok(())
    }

    pub async fn moderate(
        &self,
        caller: &Caller,
        kind: MediaKind,
        id: i64,
        transition: Transition,
    ) -> AppResult<SubmissionResponse> {
        caller.ensure_admin()?;
        let mut record = self.find(kind, id).await?;

        moderate(&self.policy, &mut record, &transition, caller.user_id, Utc::now())?;
        let record = self.submissions.update(record).await?;
        tracing::info!(
            submission_id = id,
            kind = kind.as_str(),
            admin_id = caller.user_id,
            "submission {}",
            transition.verb()
        );

        let tags = self.tags_of(record.id).await?;
        Ok(self.present(record, tags).await)
    }

    async fn find(&self, kind: MediaKind, id: i64) -> AppResult<submission::Model> {
        self.submissions.find(kind, id).await?.ok_or_else(|| {
            AppError::not_found("SUBMISSION_NOT_FOUND", format!("{} submission not found", kind.label()))
        })
    }

    async fn tags_of(&self, id: i64) -> AppResult<Vec<tag::Model>> {
        let mut grouped: HashMap<i64, Vec<tag::Model>> = self.submissions.tags_for(&[id]).await?;
        Ok(grouped.remove(&id).unwrap_or_default())
    }

    async fn present(&self, mut record: submission::Model, tags: Vec<tag::Model>) -> SubmissionResponse {
        record.media_url = self.storage.retrieval_url(record.kind, &record.media_url).await;
        SubmissionResponse { submission: record, tags }
    }
}
