use async_trait::async_trait;
use chrono::Utc;
use sea_orm::*;

use crate::entities::user::{self, Entity as User, UserRole};
use crate::models::admin_model::{UserFilter, UserStats};
use crate::repositories::{NewUser, StoreError, UserStore};

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(&self.db).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    async fn create(&self, new_user: NewUser) -> Result<user::Model, StoreError> {
        let now = Utc::now();
        let model = user::ActiveModel {
            id: NotSet,
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            full_name: Set(new_user.full_name),
            role: Set(new_user.role),
            profile_picture_url: Set(None),
            bio: Set(None),
            interests: Set(None),
            total_creations: Set(0),
            total_likes: Set(0),
            trending_score: Set(0),
            community_rank: Set(None),
            is_verified: Set(false),
            is_active: Set(true),
            email_verified: Set(new_user.email_verified),
            created_at: Set(now),
            updated_at: Set(now),
            last_login: Set(None),
        };

        Ok(model.insert(&self.db).await?)
    }

    async fn update(&self, model: user::Model) -> Result<user::Model, DbErr> {
        let mut active = model.into_active_model().reset_all();
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await
    }

    async fn list(&self, filter: &UserFilter) -> Result<Vec<user::Model>, DbErr> {
        let mut query = User::find();
        if let Some(role) = filter.role {
            query = query.filter(user::Column::Role.eq(role));
        }
        if let Some(is_active) = filter.is_active {
            query = query.filter(user::Column::IsActive.eq(is_active));
        }

        query
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .all(&self.db)
            .await
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let result = User::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn stats(&self) -> Result<UserStats, DbErr> {
        let total_users = User::find().count(&self.db).await?;
        let admin_users = User::find()
            .filter(user::Column::Role.eq(UserRole::Admin))
            .count(&self.db)
            .await?;
        let active_users = User::find()
            .filter(user::Column::IsActive.eq(true))
            .count(&self.db)
            .await?;
        let regular_users = User::find()
            .filter(user::Column::Role.eq(UserRole::User))
            .count(&self.db)
            .await?;

        Ok(UserStats { total_users, admin_users, active_users, regular_users })
    }
}
