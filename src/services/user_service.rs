use std::sync::Arc;

use crate::auth::Caller;
use crate::entities::user;
use crate::models::admin_model::{UserFilter, UserStats};
use crate::repositories::UserStore;
use crate::utils::app_error::{AppError, AppResult};

/// Admin-side account management.
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn list(&self, caller: &Caller, filter: &UserFilter) -> AppResult<Vec<user::Model>> {
        caller.ensure_admin()?;
        Ok(self.users.list(filter).await?)
    }

    pub async fn get(&self, caller: &Caller, id: i64) -> AppResult<user::Model> {
        caller.ensure_admin()?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("USER_NOT_FOUND", "User not found"))
    }

    pub async fn update_status(&self, caller: &Caller, id: i64, is_active: bool) -> AppResult<user::Model> {
        let mut user = self.get(caller, id).await?;
        user.is_active = is_active;
        let user = self.users.update(user).await?;
        tracing::info!(admin_id = caller.user_id, user_id = id, is_active, "user status changed");
        Ok(user)
    }

    pub async fn delete(&self, caller: &Caller, id: i64) -> AppResult<()> {
        caller.ensure_admin()?;
        if caller.user_id == id {
            return Err(AppError::forbidden("SELF_DELETE", "You cannot delete your own account"));
        }
        let deleted = self
            .users
            .delete(id)
            .await
            .map_err(AppError::on_referenced(
                "USER_HAS_SUBMISSIONS",
                "User still owns submissions; delete them first",
            ))?;
        if deleted == 0 {
            return Err(AppError::not_found("USER_NOT_FOUND", "User not found"));
        }
        tracing::info!(admin_id = caller.user_id, user_id = id, "user deleted");
        Ok(())
    }

    pub async fn stats(&self, caller: &Caller) -> AppResult<UserStats> {
        caller.ensure_admin()?;
        Ok(self.users.stats().await?)
    }
}
