use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;

use crate::entities::{
    submission_tag,
    tag::{self, Entity as Tag, TagCategory},
};
use crate::models::tag_model::{CategoryCount, TagFilter, TagStats};
use crate::repositories::{NewTag, StoreError, TagStore};

#[derive(Clone)]
pub struct TagRepository {
    db: DatabaseConnection,
}

impl TagRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagStore for TagRepository {
    async fn list(&self, filter: &TagFilter) -> Result<Vec<tag::Model>, DbErr> {
        let mut query = Tag::find();
        if let Some(category) = filter.category {
            query = query.filter(tag::Column::Category.eq(category));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(tag::Column::IsActive.eq(is_active));
        }

        query
            .order_by_desc(tag::Column::UsageCount)
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
    }

    async fn find(&self, id: i64) -> Result<Option<tag::Model>, DbErr> {
        Tag::find_by_id(id).one(&self.db).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<tag::Model>, DbErr> {
        Tag::find().filter(tag::Column::Name.eq(name)).one(&self.db).await
    }

    async fn insert(&self, new_tag: NewTag) -> Result<tag::Model, StoreError> {
        let now = Utc::now();
        let model = tag::ActiveModel {
            id: NotSet,
            name: Set(new_tag.name),
            category: Set(new_tag.category),
            description: Set(new_tag.description),
            usage_count: Set(0),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(model.insert(&self.db).await?)
    }

    async fn update(&self, model: tag::Model) -> Result<tag::Model, StoreError> {
        let mut active = model.into_active_model().reset_all();
        active.updated_at = Set(Utc::now());
        Ok(active.update(&self.db).await?)
    }

    async fn delete(&self, id: i64) -> Result<u64, DbErr> {
        let result = Tag::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn search(&self, query: &str, limit: u64) -> Result<Vec<tag::Model>, DbErr> {
        Tag::find()
            .filter(tag::Column::Name.contains(query))
            .order_by_desc(tag::Column::UsageCount)
            .order_by_asc(tag::Column::Name)
            .limit(limit)
            .all(&self.db)
            .await
    }

    async fn reference_count(&self, id: i64) -> Result<u64, DbErr> {
        submission_tag::Entity::find()
            .filter(submission_tag::Column::TagId.eq(id))
            .count(&self.db)
            .await
    }

    async fn stats(&self) -> Result<TagStats, DbErr> {
        let total_tags = Tag::find().count(&self.db).await?;

        let mut by_category = Vec::new();
        for category in TagCategory::iter() {
            let count = Tag::find()
                .filter(tag::Column::Category.eq(category))
                .count(&self.db)
                .await?;
            by_category.push(CategoryCount { category, count });
        }

        Ok(TagStats { total_tags, by_category })
    }
}
