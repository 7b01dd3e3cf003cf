//! Moderation lifecycle shared by every submission kind.
//!
//! `Pending -> {Approved, Rejected}`, `Approved -> Published`,
//! `Published -> Approved` (unpublish). Approve and reject are accepted from
//! any state; publish is the only guarded transition.

use chrono::{DateTime, Utc};

use crate::entities::submission::{self, MediaKind, ModerationStatus};
use crate::utils::app_error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ModerationState {
    pub status: ModerationStatus,
    pub is_published: bool,
    pub verified_by: Option<i64>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Approve,
    Reject { reason: Option<String> },
    Publish,
    Unpublish,
}

impl Transition {
    pub fn verb(&self) -> &'static str {
        match self {
            Transition::Approve => "approved",
            Transition::Reject { .. } => "rejected",
            Transition::Publish => "published",
            Transition::Unpublish => "unpublished",
        }
    }
}

/// Knobs for the two behaviours that differ between deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModerationPolicy {
    /// Stamp `verified_at`/`verified_by` on approval for every kind instead
    /// of images only.
    pub stamp_all_kinds: bool,
    /// Clear `is_published` when a submission is rejected.
    pub reject_unpublishes: bool,
}

impl ModerationPolicy {
    fn stamps(&self, kind: MediaKind) -> bool {
        self.stamp_all_kinds || kind == MediaKind::Image
    }

    /// Apply `transition` by admin `actor` at `now`.
    pub fn apply(
        &self,
        kind: MediaKind,
        state: &ModerationState,
        transition: &Transition,
        actor: i64,
        now: DateTime<Utc>,
    ) -> AppResult<ModerationState> {
        let mut next = state.clone();
        match transition {
            Transition::Approve => {
                next.status = ModerationStatus::Approved;
                next.rejection_reason = None;
                if self.stamps(kind) {
                    next.verified_at = Some(now);
                    next.verified_by = Some(actor);
                }
            }
            Transition::Reject { reason } => {
                next.status = ModerationStatus::Rejected;
                next.rejection_reason = reason.clone();
                if self.reject_unpublishes {
                    next.is_published = false;
                }
            }
            Transition::Publish => {
                if state.status != ModerationStatus::Approved {
                    return Err(AppError::bad_request(
                        "NOT_APPROVED",
                        format!("Only approved {} submissions can be published", kind.as_str()),
                    ));
                }
                next.is_published = true;
            }
            Transition::Unpublish => {
                next.is_published = false;
            }
        }
        Ok(next)
    }
}

/// Anything the lifecycle can govern.
pub trait Moderated {
    fn owner_id(&self) -> i64;
    fn media_kind(&self) -> MediaKind;
    fn storage_url(&self) -> &str;
    fn moderation(&self) -> ModerationState;
    fn apply_moderation(&mut self, state: ModerationState);
}

impl Moderated for submission::Model {
    fn owner_id(&self) -> i64 {
        self.user_id
    }

    fn media_kind(&self) -> MediaKind {
        self.kind
    }

    fn storage_url(&self) -> &str {
        &self.media_url
    }

    fn moderation(&self) -> ModerationState {
        ModerationState {
            status: self.status,
            is_published: self.is_published,
            verified_by: self.verified_by,
            verified_at: self.verified_at,
            rejection_reason: self.rejection_reason.clone(),
        }
    }

    fn apply_moderation(&mut self, state: ModerationState) {
        self.status = state.status;
        self.is_published = state.is_published;
        self.verified_by = state.verified_by;
        self.verified_at = state.verified_at;
        self.rejection_reason = state.rejection_reason;
    }
}

/// Run `transition` against any moderated record in place.
pub fn moderate<M: Moderated>(
    policy: &ModerationPolicy,
    record: &mut M,
    transition: &Transition,
    actor: i64,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let next = policy.apply(record.media_kind(), &record.moderation(), transition, actor, now)?;
    record.apply_moderation(next);
    Ok(())
}
