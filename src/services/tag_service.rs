use std::str::FromStr;
use std::sync::Arc;

use crate::auth::Caller;
use crate::entities::tag;
use crate::models::tag_model::{CreateTagRequest, TagFilter, TagStats, UpdateTagRequest};
use crate::repositories::{NewTag, TagStore};
use crate::utils::app_error::{AppError, AppResult};

const DEFAULT_SEARCH_LIMIT: u64 = 10;
const MAX_SEARCH_LIMIT: u64 = 100;
const TAG_EXISTS_MESSAGE: &str = "Tag with this name already exists";

/// What happens when a tag still linked to submissions is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagDeletePolicy {
    /// Delete anyway; links disappear with the tag.
    #[default]
    Unconditional,
    /// Refuse with `Conflict` while any submission references the tag.
    Restrict,
}

impl FromStr for TagDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "unconditional" => Ok(Self::Unconditional),
            "restrict" => Ok(Self::Restrict),
            other => Err(format!("unknown tag delete policy '{}'", other)),
        }
    }
}

pub struct TagService {
    tags: Arc<dyn TagStore>,
    delete_policy: TagDeletePolicy,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagStore>, delete_policy: TagDeletePolicy) -> Self {
        Self { tags, delete_policy }
    }

    pub async fn list(&self, filter: &TagFilter) -> AppResult<Vec<tag::Model>> {
        Ok(self.tags.list(filter).await?)
    }

    pub async fn get(&self, id: i64) -> AppResult<tag::Model> {
        self.tags
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found("TAG_NOT_FOUND", "Tag not found"))
    }

    pub async fn create(&self, caller: &Caller, req: CreateTagRequest) -> AppResult<tag::Model> {
        caller.ensure_admin()?;
        if self.tags.find_by_name(&req.name).await?.is_some() {
            return Err(AppError::conflict("TAG_EXISTS", TAG_EXISTS_MESSAGE));
        }

        let tag = self
            .tags
            .insert(NewTag { name: req.name, category: req.category, description: req.description })
            .await
            .map_err(AppError::on_duplicate("TAG_EXISTS", TAG_EXISTS_MESSAGE))?;
        tracing::info!(tag_id = tag.id, name = %tag.name, "tag created");
        Ok(tag)
    }

    pub async fn update(&self, caller: &Caller, id: i64, req: UpdateTagRequest) -> AppResult<tag::Model> {
        caller.ensure_admin()?;
        let mut tag = self.get(id).await?;

        if let Some(name) = req.name {
            if name != tag.name {
                if self.tags.find_by_name(&name).await?.is_some() {
                    return Err(AppError::conflict("TAG_EXISTS", TAG_EXISTS_MESSAGE));
                }
                tag.name = name;
            }
        }
        if let Some(category) = req.category {
            tag.category = category;
        }
        if let Some(description) = req.description {
            tag.description = Some(description);
        }
        if let Some(is_active) = req.is_active {
            tag.is_active = is_active;
        }

        self.tags
            .update(tag)
            .await
            .map_err(AppError::on_duplicate("TAG_EXISTS", TAG_EXISTS_MESSAGE))
    }

    pub async fn delete(&self, caller: &Caller, id: i64) -> AppResult<()> {
        caller.ensure_admin()?;
        let tag = self.get(id).await?;

        if self.delete_policy == TagDeletePolicy::Restrict {
            let references = self.tags.reference_count(id).await?;
            if references > 0 {
                return Err(AppError::conflict(
                    "TAG_IN_USE",
                    format!("Tag is attached to {} submission(s)", references),
                ));
            }
        }

        self.tags.delete(id).await?;
        tracing::info!(tag_id = id, name = %tag.name, "tag deleted");
        Ok(())
    }

    pub async fn search(&self, query: &str, limit: Option<u64>) -> AppResult<Vec<tag::Model>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::bad_request("SEARCH_QUERY_REQUIRED", "Search query is required"));
        }
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_SEARCH_LIMIT);
        Ok(self.tags.search(query, limit).await?)
    }

    pub async fn stats(&self) -> AppResult<TagStats> {
        Ok(self.tags.stats().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{submission::MediaKind, tag::TagCategory, user::UserRole};
    use crate::testing::InMemoryStore;

    const ADMIN: Caller = Caller { user_id: 1, role: UserRole::Admin };

    fn create(name: &str, category: TagCategory) -> CreateTagRequest {
        CreateTagRequest { name: name.into(), category, description: None }
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("".parse::<TagDeletePolicy>().unwrap(), TagDeletePolicy::Unconditional);
        assert_eq!("Restrict".parse::<TagDeletePolicy>().unwrap(), TagDeletePolicy::Restrict);
        assert!("cascade-ish".parse::<TagDeletePolicy>().is_err());
    }

    #[tokio::test]
    async fn names_are_unique_on_create_and_rename() {
        let store = InMemoryStore::new();
        let svc = TagService::new(Arc::new(store), TagDeletePolicy::default());

        svc.create(&ADMIN, create("Neon", TagCategory::Color)).await.unwrap();
        let noir = svc.create(&ADMIN, create("Noir", TagCategory::Mood)).await.unwrap();

        let err = svc.create(&ADMIN, create("Neon", TagCategory::Style)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));

        let rename = UpdateTagRequest { name: Some("Neon".into()), ..Default::default() };
        let err = svc.update(&ADMIN, noir.id, rename).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));

        // Keeping the same name is not a clash.
        let same = UpdateTagRequest {
            name: Some("Noir".into()),
            description: Some("dark".into()),
            ..Default::default()
        };
        let noir = svc.update(&ADMIN, noir.id, same).await.unwrap();
        assert_eq!(noir.description.as_deref(), Some("dark"));
    }

    #[tokio::test]
    async fn insert_race_reports_tag_exists() {
        let store = InMemoryStore::new();
        let svc = TagService::new(Arc::new(store.clone()), TagDeletePolicy::default());
        svc.create(&ADMIN, create("Neon", TagCategory::Color)).await.unwrap();
        let noir = svc.create(&ADMIN, create("Noir", TagCategory::Mood)).await.unwrap();

        store.stale_lookups();
        let err = svc.create(&ADMIN, create("Neon", TagCategory::Style)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { code: "TAG_EXISTS", .. }));

        let rename = UpdateTagRequest { name: Some("Neon".into()), ..Default::default() };
        let err = svc.update(&ADMIN, noir.id, rename).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { code: "TAG_EXISTS", .. }));
    }

    #[tokio::test]
    async fn list_orders_by_usage_then_name() {
        let store = InMemoryStore::new();
        let svc = TagService::new(Arc::new(store.clone()), TagDeletePolicy::default());
        let b = svc.create(&ADMIN, create("Bokeh", TagCategory::Technique)).await.unwrap();
        svc.create(&ADMIN, create("Abstract", TagCategory::Style)).await.unwrap();
        svc.create(&ADMIN, create("Calm", TagCategory::Mood)).await.unwrap();
        store.set_tag_usage(b.id, 5);

        let names: Vec<_> = svc
            .list(&TagFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["Bokeh", "Abstract", "Calm"]);
    }

    #[tokio::test]
    async fn search_requires_query_and_matches_substrings() {
        let store = InMemoryStore::new();
        let svc = TagService::new(Arc::new(store), TagDeletePolicy::default());
        svc.create(&ADMIN, create("Cyberpunk", TagCategory::Theme)).await.unwrap();
        svc.create(&ADMIN, create("Steampunk", TagCategory::Theme)).await.unwrap();
        svc.create(&ADMIN, create("Pastel", TagCategory::Color)).await.unwrap();

        let err = svc.search("   ", None).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));

        let hits = svc.search("punk", None).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(svc.search("punk", Some(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn restrict_policy_blocks_deleting_referenced_tags() {
        let store = InMemoryStore::new();
        let owner = store.seed_user("ann", "ann@x.com", UserRole::User);
        let tag = store.seed_tag("Glitch", TagCategory::Style);
        let submission = store.seed_submission(MediaKind::Gif, owner.id);
        store.link_tag(submission.id, tag.id);

        let strict = TagService::new(Arc::new(store.clone()), TagDeletePolicy::Restrict);
        let err = strict.delete(&ADMIN, tag.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { code: "TAG_IN_USE", .. }));

        let lenient = TagService::new(Arc::new(store.clone()), TagDeletePolicy::Unconditional);
        lenient.delete(&ADMIN, tag.id).await.unwrap();
        assert!(matches!(lenient.get(tag.id).await, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn stats_count_every_category() {
        let store = InMemoryStore::new();
        let svc = TagService::new(Arc::new(store), TagDeletePolicy::default());
        svc.create(&ADMIN, create("Red", TagCategory::Color)).await.unwrap();
        svc.create(&ADMIN, create("Blue", TagCategory::Color)).await.unwrap();
        svc.create(&ADMIN, create("Eerie", TagCategory::Mood)).await.unwrap();

        let stats = svc.stats().await.unwrap();
        assert_eq!(stats.total_tags, 3);
        assert_eq!(stats.by_category.len(), 6);
        let color = stats.by_category.iter().find(|c| c.category == TagCategory::Color).unwrap();
        assert_eq!(color.count, 2);
    }
}
