use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::tag::TagCategory;

#[derive(Deserialize, Validate)]
pub struct CreateTagRequest {
    #[serde(default)]
    #[validate(custom(function = "crate::utils::validator_utils::validate_required"))]
    #[validate(length(max = 100, message = "Tag name must be at most 100 characters"))]
    pub name: String,
    pub category: TagCategory,
    pub description: Option<String>,
}

#[derive(Deserialize, Validate, Default)]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, max = 100, message = "Tag name must be 1-100 characters"))]
    pub name: Option<String>,
    pub category: Option<TagCategory>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct TagFilter {
    pub category: Option<TagCategory>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct TagSearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<u64>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: TagCategory,
    pub count: u64,
}

#[derive(Serialize, Debug)]
pub struct TagStats {
    pub total_tags: u64,
    pub by_category: Vec<CategoryCount>,
}
