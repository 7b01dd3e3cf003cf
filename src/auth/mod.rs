use serde::Serialize;

use crate::entities::user::UserRole;
use crate::utils::app_error::{AppError, AppResult};

/// Who is calling an authenticated operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Caller {
    pub user_id: i64,
    pub role: UserRole,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn ensure_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("ACCESS_DENIED", "Admin access required"))
        }
    }

    /// Admins may act on anything; everyone else only on what they own.
    pub fn ensure_owner_or_admin(&self, owner_id: i64) -> AppResult<()> {
        if self.is_admin() || self.user_id == owner_id {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "ACCESS_DENIED",
                "You don't have permission to modify this resource",
            ))
        }
    }
}
