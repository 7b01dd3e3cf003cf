//! In-memory stand-ins for the persistence and collaborator traits.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{DbErr, Iterable};

use crate::entities::{
    otp::{self, OtpPurpose},
    submission::{self, MediaKind, ModerationStatus},
    tag::{self, TagCategory},
    user::{self, UserRole},
};
use crate::models::{
    admin_model::{UserFilter, UserStats},
    auth_model::Claims,
    submission_model::{MediaMetadata, NewSubmission, SubmissionFilter},
    tag_model::{CategoryCount, TagFilter, TagStats},
};
use crate::repositories::{NewOtp, NewTag, NewUser, OtpStore, StoreError, SubmissionStore, TagStore, UserStore};
use crate::services::credential_service::TokenError;
use crate::services::media_storage::MediaStorage;
use crate::services::{BoxError, CredentialIssuer, EmailSender, ImageCdn, ObjectStorage};

/// Ordered log shared between fakes so tests can assert call order across
/// storage and database.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Default)]
struct StoreState {
    seq: i64,
    users: BTreeMap<i64, user::Model>,
    otps: BTreeMap<i64, otp::Model>,
    tags: BTreeMap<i64, tag::Model>,
    submissions: BTreeMap<i64, submission::Model>,
    links: BTreeSet<(i64, i64)>,
    fail_submission_inserts: bool,
    stale_lookups: bool,
}

impl StoreState {
    /// Ids and timestamps both advance, so "newest" is well defined.
    fn next(&mut self) -> (i64, DateTime<Utc>) {
        self.seq += 1;
        (self.seq, Utc::now() + Duration::milliseconds(self.seq))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
    journal: Journal,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    pub fn seed_user(&self, username: &str, email: &str, role: UserRole) -> user::Model {
        let mut state = self.state.lock().unwrap();
        let (id, now) = state.next();
        let model = user::Model {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: "hashed:password1".into(),
            full_name: None,
            role,
            profile_picture_url: None,
            bio: None,
            interests: None,
            total_creations: 0,
            total_likes: 0,
            trending_score: 0,
            community_rank: None,
            is_verified: false,
            is_active: true,
            email_verified: true,
            created_at: now,
            updated_at: now,
            last_login: None,
        };
        state.users.insert(id, model.clone());
        model
    }

    /// Name and email lookups miss every row, as if a concurrent insert
    /// landed after the caller's availability check.
    pub fn stale_lookups(&self) {
        self.state.lock().unwrap().stale_lookups = true;
    }

    pub fn user(&self, id: i64) -> Option<user::Model> {
        self.state.lock().unwrap().users.get(&id).cloned()
    }

    pub fn set_user_active(&self, id: i64, is_active: bool) {
        if let Some(u) = self.state.lock().unwrap().users.get_mut(&id) {
            u.is_active = is_active;
        }
    }

    pub fn otps_for(&self, email: &str) -> Vec<otp::Model> {
        let state = self.state.lock().unwrap();
        state.otps.values().filter(|o| o.email == email).cloned().collect()
    }

    pub fn expire_otps(&self, email: &str) {
        let mut state = self.state.lock().unwrap();
        for o in state.otps.values_mut().filter(|o| o.email == email) {
            o.expires_at = Utc::now() - Duration::minutes(1);
        }
    }

    pub fn seed_tag(&self, name: &str, category: TagCategory) -> tag::Model {
        let mut state = self.state.lock().unwrap();
        let (id, now) = state.next();
        let model = tag::Model {
            id,
            name: name.into(),
            category,
            description: None,
            usage_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.tags.insert(id, model.clone());
        model
    }

    pub fn set_tag_usage(&self, id: i64, usage_count: i32) {
        if let Some(t) = self.state.lock().unwrap().tags.get_mut(&id) {
            t.usage_count = usage_count;
        }
    }

    pub fn seed_submission(&self, kind: MediaKind, owner_id: i64) -> submission::Model {
        let mut state = self.state.lock().unwrap();
        let (id, now) = state.next();
        let media_url = match kind {
            MediaKind::Image => format!("https://cdn.test/gallery/seed_{}.png", id),
            MediaKind::Gif => format!("https://s3.test/gif-bucket/gifs/seed_{}.gif", id),
            MediaKind::Video => format!("https://s3.test/video-bucket/videos/seed_{}.mp4", id),
        };
        let model = submission_model(id, now, kind, owner_id, media_url, MediaMetadata::default());
        state.submissions.insert(id, model.clone());
        model
    }

    pub fn link_tag(&self, submission_id: i64, tag_id: i64) {
        self.state.lock().unwrap().links.insert((submission_id, tag_id));
    }

    pub fn submission(&self, id: i64) -> Option<submission::Model> {
        self.state.lock().unwrap().submissions.get(&id).cloned()
    }

    pub fn submissions_of(&self, kind: MediaKind) -> Vec<submission::Model> {
        let state = self.state.lock().unwrap();
        state.submissions.values().filter(|s| s.kind == kind).cloned().collect()
    }

    pub fn fail_submission_inserts(&self, fail: bool) {
        self.state.lock().unwrap().fail_submission_inserts = fail;
    }
}

fn submission_model(
    id: i64,
    now: DateTime<Utc>,
    kind: MediaKind,
    user_id: i64,
    media_url: String,
    meta: MediaMetadata,
) -> submission::Model {
    submission::Model {
        id,
        kind,
        user_id,
        project_title: format!("Submission {}", id),
        prompt: "prompt".into(),
        technical_notes: None,
        model_or_tool: None,
        creator_credit: "credit".into(),
        media_url,
        media_filename: None,
        size_bytes: meta.size_bytes,
        width: meta.width,
        height: meta.height,
        duration_seconds: meta.duration_seconds,
        frame_count: meta.frame_count,
        video_format: meta.video_format,
        fps: meta.fps,
        status: ModerationStatus::Pending,
        verified_by: None,
        verified_at: None,
        rejection_reason: None,
        likes_count: 0,
        views_count: 0,
        downloads_count: 0,
        is_featured: false,
        is_published: false,
        created_at: now,
        updated_at: now,
    }
}

fn missing(what: &str, id: i64) -> DbErr {
    DbErr::RecordNotFound(format!("{} {}", what, id))
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (DateTime<Utc>, i64)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, DbErr> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        let state = self.state.lock().unwrap();
        if state.stale_lookups {
            return Ok(None);
        }
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr> {
        let state = self.state.lock().unwrap();
        if state.stale_lookups {
            return Ok(None);
        }
        Ok(state.users.values().find(|u| u.username == username).cloned())
    }

    async fn create(&self, new_user: NewUser) -> Result<user::Model, StoreError> {
        {
            let state = self.state.lock().unwrap();
            if state.users.values().any(|u| u.username == new_user.username) {
                return Err(StoreError::Duplicate("users_username_key".into()));
            }
            if state.users.values().any(|u| u.email == new_user.email) {
                return Err(StoreError::Duplicate("users_email_key".into()));
            }
        }
        let model = self.seed_user(&new_user.username, &new_user.email, new_user.role);
        let mut state = self.state.lock().unwrap();
        let stored = state.users.get_mut(&model.id).ok_or_else(|| missing("user", model.id))?;
        stored.password_hash = new_user.password_hash;
        stored.full_name = new_user.full_name;
        stored.email_verified = new_user.email_verified;
        Ok(stored.clone())
    }

    async fn update(&self, mut model: user::Model) -> Result<user::Model, DbErr> {
        let mut state = self.state.lock().unwrap();
        if !state.users.contains_key(&model.id) {
            return Err(missing("user", model.id));
        }
        model.updated_at = Utc::now();
        state.users.insert(model.id, model.clone());
        Ok(model)
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<user::Model>, DbErr> {
        let state = self.state.lock().unwrap();
        let mut users: Vec<_> = state
            .users
            .values()
            .filter(|u| filter.role.is_none_or(|r| u.role == r))
            .filter(|u| filter.is_active.is_none_or(|a| u.is_active == a))
            .cloned()
            .collect();
        newest_first(&mut users, |u| (u.created_at, u.id));
        Ok(users)
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.submissions.values().any(|s| s.user_id == id) {
            return Err(StoreError::Referenced("fk_submissions_user_id".into()));
        }
        Ok(state.users.remove(&id).map_or(0, |_| 1))
    }

    async fn stats(&self) -> Result<UserStats, DbErr> {
        let state = self.state.lock().unwrap();
        let users: Vec<&user::Model> = state.users.values().collect();
        let with_role = |role: UserRole| users.iter().filter(|u| u.role == role).count() as u64;
        Ok(UserStats {
            total_users: users.len() as u64,
            admin_users: with_role(UserRole::Admin),
            active_users: users.iter().filter(|u| u.is_active).count() as u64,
            regular_users: with_role(UserRole::User),
        })
    }
}

#[async_trait]
impl OtpStore for InMemoryStore {
    async fn delete_unverified(&self, email: &str, purpose: OtpPurpose) -> Result<u64, DbErr> {
        let mut state = self.state.lock().unwrap();
        let before = state.otps.len();
        state
            .otps
            .retain(|_, o| !(o.email == email && o.purpose == purpose && !o.verified));
        Ok((before - state.otps.len()) as u64)
    }

    async fn insert(&self, new_otp: NewOtp) -> Result<otp::Model, DbErr> {
        let mut state = self.state.lock().unwrap();
        let (id, now) = state.next();
        let model = otp::Model {
            id,
            email: new_otp.email,
            code: new_otp.code,
            purpose: new_otp.purpose,
            expires_at: new_otp.expires_at,
            verified: false,
            created_at: now,
        };
        state.otps.insert(id, model.clone());
        Ok(model)
    }

    async fn latest_unverified(&self, email: &str, code: &str) -> Result<Option<otp::Model>, DbErr> {
        let state = self.state.lock().unwrap();
        Ok(state
            .otps
            .values()
            .filter(|o| o.email == email && o.code == code && !o.verified)
            .max_by_key(|o| (o.created_at, o.id))
            .cloned())
    }

    async fn latest_verified(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<otp::Model>, DbErr> {
        let state = self.state.lock().unwrap();
        Ok(state
            .otps
            .values()
            .filter(|o| o.email == email && o.code == code && o.purpose == purpose && o.verified)
            .max_by_key(|o| (o.created_at, o.id))
            .cloned())
    }

    async fn mark_verified(&self, id: i64) -> Result<(), DbErr> {
        let mut state = self.state.lock().unwrap();
        let record = state.otps.get_mut(&id).ok_or_else(|| missing("otp", id))?;
        record.verified = true;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbErr> {
        self.state.lock().unwrap().otps.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for InMemoryStore {
    async fn insert(&self, new: NewSubmission) -> Result<submission::Model, DbErr> {
        let mut state = self.state.lock().unwrap();
        if state.fail_submission_inserts {
            return Err(DbErr::Custom("insert rejected".into()));
        }
        let (id, now) = state.next();
        let mut model = submission_model(id, now, new.kind, new.user_id, new.media_url, new.metadata);
        model.project_title = new.project_title;
        model.prompt = new.prompt;
        model.technical_notes = new.technical_notes;
        model.model_or_tool = new.model_or_tool;
        model.creator_credit = new.creator_credit;
        model.media_filename = new.media_filename;
        state.submissions.insert(id, model.clone());
        self.journal.push(format!("db.insert submission {}", id));
        Ok(model)
    }

    async fn find(&self, kind: MediaKind, id: i64) -> Result<Option<submission::Model>, DbErr> {
        Ok(self.submission(id).filter(|s| s.kind == kind))
    }

    async fn list(&self, kind: MediaKind, filter: &SubmissionFilter) -> Result<Vec<submission::Model>, DbErr> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<_> = state
            .submissions
            .values()
            .filter(|s| s.kind == kind)
            .filter(|s| filter.status.is_none_or(|st| s.status == st))
            .filter(|s| filter.user_id.is_none_or(|u| s.user_id == u))
            .filter(|s| filter.is_featured.is_none_or(|f| s.is_featured == f))
            .cloned()
            .collect();
        newest_first(&mut rows, |s| (s.created_at, s.id));
        Ok(rows)
    }

    async fn update(&self, mut model: submission::Model) -> Result<submission::Model, DbErr> {
        let mut state = self.state.lock().unwrap();
        if !state.submissions.contains_key(&model.id) {
            return Err(missing("submission", model.id));
        }
        model.updated_at = Utc::now();
        state.submissions.insert(model.id, model.clone());
        Ok(model)
    }

    async fn delete(&self, id: i64) -> Result<u64, DbErr> {
        let mut state = self.state.lock().unwrap();
        let removed = state.submissions.remove(&id).map_or(0, |_| 1);
        state.links.retain(|(sid, _)| *sid != id);
        self.journal.push(format!("db.delete submission {}", id));
        Ok(removed)
    }

    async fn attach_tags(&self, submission_id: i64, tag_ids: &[i64]) -> Result<Vec<tag::Model>, DbErr> {
        let mut state = self.state.lock().unwrap();
        let mut found: Vec<tag::Model> = tag_ids.iter().filter_map(|id| state.tags.get(id).cloned()).collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found.dedup_by_key(|t| t.id);
        for t in &found {
            state.links.insert((submission_id, t.id));
        }
        Ok(found)
    }

    async fn tags_for(&self, submission_ids: &[i64]) -> Result<HashMap<i64, Vec<tag::Model>>, DbErr> {
        let state = self.state.lock().unwrap();
        let mut grouped: HashMap<i64, Vec<tag::Model>> = HashMap::new();
        for (sid, tid) in &state.links {
            if submission_ids.contains(sid) {
                if let Some(t) = state.tags.get(tid) {
                    grouped.entry(*sid).or_default().push(t.clone());
                }
            }
        }
        for tags in grouped.values_mut() {
            tags.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(grouped)
    }
}

fn by_usage_then_name(tags: &mut [tag::Model]) {
    tags.sort_by(|a, b| b.usage_count.cmp(&a.usage_count).then_with(|| a.name.cmp(&b.name)));
}

#[async_trait]
impl TagStore for InMemoryStore {
    async fn list(&self, filter: &TagFilter) -> Result<Vec<tag::Model>, DbErr> {
        let state = self.state.lock().unwrap();
        let mut tags: Vec<_> = state
            .tags
            .values()
            .filter(|t| filter.category.is_none_or(|c| t.category == c))
            .filter(|t| filter.is_active.is_none_or(|a| t.is_active == a))
            .cloned()
            .collect();
        by_usage_then_name(&mut tags);
        Ok(tags)
    }

    async fn find(&self, id: i64) -> Result<Option<tag::Model>, DbErr> {
        Ok(self.state.lock().unwrap().tags.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<tag::Model>, DbErr> {
        let state = self.state.lock().unwrap();
        if state.stale_lookups {
            return Ok(None);
        }
        Ok(state.tags.values().find(|t| t.name == name).cloned())
    }

    async fn insert(&self, new_tag: NewTag) -> Result<tag::Model, StoreError> {
        if self.state.lock().unwrap().tags.values().any(|t| t.name == new_tag.name) {
            return Err(StoreError::Duplicate("tags_name_key".into()));
        }
        let seeded = self.seed_tag(&new_tag.name, new_tag.category);
        let mut state = self.state.lock().unwrap();
        let stored = state.tags.get_mut(&seeded.id).ok_or_else(|| missing("tag", seeded.id))?;
        stored.description = new_tag.description;
        Ok(stored.clone())
    }

    async fn update(&self, mut model: tag::Model) -> Result<tag::Model, StoreError> {
        let mut state = self.state.lock().unwrap();
        if !state.tags.contains_key(&model.id) {
            return Err(missing("tag", model.id).into());
        }
        if state.tags.values().any(|t| t.id != model.id && t.name == model.name) {
            return Err(StoreError::Duplicate("tags_name_key".into()));
        }
        model.updated_at = Utc::now();
        state.tags.insert(model.id, model.clone());
        Ok(model)
    }

    async fn delete(&self, id: i64) -> Result<u64, DbErr> {
        let mut state = self.state.lock().unwrap();
        state.links.retain(|(_, tid)| *tid != id);
        Ok(state.tags.remove(&id).map_or(0, |_| 1))
    }

    async fn search(&self, query: &str, limit: u64) -> Result<Vec<tag::Model>, DbErr> {
        let state = self.state.lock().unwrap();
        let mut tags: Vec<_> = state.tags.values().filter(|t| t.name.contains(query)).cloned().collect();
        by_usage_then_name(&mut tags);
        tags.truncate(limit as usize);
        Ok(tags)
    }

    async fn reference_count(&self, id: i64) -> Result<u64, DbErr> {
        let state = self.state.lock().unwrap();
        Ok(state.links.iter().filter(|(_, tid)| *tid == id).count() as u64)
    }

    async fn stats(&self) -> Result<TagStats, DbErr> {
        let state = self.state.lock().unwrap();
        let by_category = TagCategory::iter()
            .map(|category| CategoryCount {
                category,
                count: state.tags.values().filter(|t| t.category == category).count() as u64,
            })
            .collect();
        Ok(TagStats { total_tags: state.tags.len() as u64, by_category })
    }
}

#[derive(Default)]
struct StorageSwitches {
    fail_put: bool,
    fail_delete: bool,
    fail_presign: bool,
}

/// Records every storage call into a journal; each operation can be made
/// to fail.
#[derive(Clone, Default)]
pub struct RecordingStorage {
    switches: Arc<Mutex<StorageSwitches>>,
    journal: Journal,
}

const STORAGE_PREFIXES: [&str; 3] = ["cdn.", "gif.", "video."];

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sharing(journal: Journal) -> Self {
        Self { switches: Arc::default(), journal }
    }

    pub fn fail_put(&self, fail: bool) {
        self.switches.lock().unwrap().fail_put = fail;
    }

    pub fn fail_delete(&self, fail: bool) {
        self.switches.lock().unwrap().fail_delete = fail;
    }

    pub fn fail_presign(&self, fail: bool) {
        self.switches.lock().unwrap().fail_presign = fail;
    }

    /// Storage entries only, in call order.
    pub fn events(&self) -> Vec<String> {
        self.journal
            .entries()
            .into_iter()
            .filter(|e| STORAGE_PREFIXES.iter().any(|p| e.starts_with(p)))
            .collect()
    }

    fn target(&self, name: &'static str) -> RecordingTarget {
        RecordingTarget { name, recorder: self.clone() }
    }

    pub fn media_storage(&self) -> MediaStorage {
        MediaStorage::new(
            Arc::new(self.target("cdn")),
            Arc::new(self.target("gif")),
            Arc::new(self.target("video")),
        )
    }
}

struct RecordingTarget {
    name: &'static str,
    recorder: RecordingStorage,
}

impl RecordingTarget {
    fn record(&self, op: &str, subject: &str) {
        self.recorder.journal.push(format!("{}.{} {}", self.name, op, subject));
    }

    fn check(&self, failing: impl Fn(&StorageSwitches) -> bool, op: &str) -> Result<(), BoxError> {
        let switches = self.recorder.switches.lock().unwrap();
        if failing(&*switches) {
            return Err(format!("{} {} unavailable", self.name, op).into());
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for RecordingTarget {
    async fn put(&self, _bytes: Vec<u8>, _content_type: &str, path: &str) -> Result<String, BoxError> {
        self.record("put", path);
        self.check(|s| s.fail_put, "put")?;
        Ok(format!("https://s3.test/{}-bucket/{}", self.name, path))
    }

    async fn delete(&self, url: &str) -> Result<(), BoxError> {
        self.record("delete", url);
        self.check(|s| s.fail_delete, "delete")
    }

    async fn presign_get(&self, url: &str, ttl: StdDuration) -> Result<String, BoxError> {
        self.record("presign", url);
        self.check(|s| s.fail_presign, "presign")?;
        Ok(format!("{}?signed={}", url, ttl.as_secs()))
    }
}

#[async_trait]
impl ImageCdn for RecordingTarget {
    async fn put(&self, _bytes: Vec<u8>, filename: &str) -> Result<String, BoxError> {
        self.record("put", filename);
        self.check(|s| s.fail_put, "put")?;
        Ok(format!("https://cdn.test/gallery/{}", filename))
    }

    async fn delete(&self, public_id: &str) -> Result<(), BoxError> {
        self.record("delete", public_id);
        self.check(|s| s.fail_delete, "delete")
    }
}

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Clone, Default)]
pub struct CapturingMailer {
    sent: Arc<Mutex<Vec<SentMail>>>,
    failing: Arc<Mutex<bool>>,
}

impl CapturingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, fail: bool) {
        *self.failing.lock().unwrap() = fail;
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    /// The code inside `<strong>` of the most recent message.
    pub fn last_code(&self) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        let html = &sent.last()?.html;
        let start = html.find("<strong>")? + "<strong>".len();
        let end = html[start..].find("</strong>")? + start;
        Some(html[start..end].to_string())
    }
}

#[async_trait]
impl EmailSender for CapturingMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), BoxError> {
        if *self.failing.lock().unwrap() {
            return Err("smtp relay down".into());
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.into(),
            subject: subject.into(),
            html: html_body.into(),
        });
        Ok(())
    }
}

/// Plain-text "hashes" and `token:{id}` tokens.
pub struct FakeCredentials;

impl CredentialIssuer for FakeCredentials {
    fn hash(&self, password: &str) -> Result<String, BoxError> {
        Ok(format!("hashed:{}", password))
    }

    fn verify(&self, credential: &str, password: &str) -> Result<bool, BoxError> {
        Ok(credential == format!("hashed:{}", password))
    }

    fn issue_token(&self, user_id: i64, _username: &str, _email: &str, _role: UserRole) -> Result<String, BoxError> {
        Ok(format!("token:{}", user_id))
    }

    fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let id = token
            .strip_prefix("token:")
            .and_then(|id| id.parse::<i64>().ok())
            .ok_or(TokenError::Invalid)?;
        Ok(Claims {
            sub: id,
            username: format!("user{}", id),
            email: format!("user{}@test", id),
            role: UserRole::User,
            exp: usize::MAX,
            iat: 0,
        })
    }
}
