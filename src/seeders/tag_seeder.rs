use crate::entities::tag::TagCategory;
use crate::repositories::{NewTag, TagStore};
use crate::utils::app_error::AppResult;

pub const DEFAULT_TAGS: &[(&str, TagCategory)] = &[
    ("Photorealistic", TagCategory::Style),
    ("Anime", TagCategory::Style),
    ("Pixel Art", TagCategory::Style),
    ("Watercolor", TagCategory::Style),
    ("Dreamy", TagCategory::Mood),
    ("Dark", TagCategory::Mood),
    ("Whimsical", TagCategory::Mood),
    ("Sci-Fi", TagCategory::Theme),
    ("Fantasy", TagCategory::Theme),
    ("Nature", TagCategory::Theme),
    ("Portrait", TagCategory::Technique),
    ("Long Exposure", TagCategory::Technique),
    ("Neon", TagCategory::Color),
    ("Monochrome", TagCategory::Color),
    ("Pastel", TagCategory::Color),
];

/// Inserts any default tag that does not exist yet. Returns how many were added.
pub async fn seed_tags(tags: &dyn TagStore) -> AppResult<usize> {
    let mut inserted = 0;
    for (name, category) in DEFAULT_TAGS {
        if tags.find_by_name(name).await?.is_some() {
            continue;
        }
        tags.insert(NewTag {
            name: name.to_string(),
            category: *category,
            description: None,
        })
        .await?;
        inserted += 1;
    }
    if inserted > 0 {
        tracing::info!(count = inserted, "seeded default tags");
    }
    Ok(inserted)
}
