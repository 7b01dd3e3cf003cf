use serde::{Deserialize, Serialize};

use crate::entities::user::UserRole;

#[derive(Deserialize, Default, Debug, Clone)]
pub struct UserFilter {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateUserStatusRequest {
    pub is_active: bool,
}

#[derive(Serialize, Debug, Default, PartialEq, Eq)]
pub struct UserStats {
    pub total_users: u64,
    pub admin_users: u64,
    pub active_users: u64,
    pub regular_users: u64,
}
