pub mod tag_seeder;
pub mod user_seeder;

use crate::config::Config;
use crate::repositories::{TagStore, UserStore};
use crate::services::CredentialIssuer;
use crate::utils::app_error::AppResult;

pub async fn run_seeders(
    config: &Config,
    users: &dyn UserStore,
    tags: &dyn TagStore,
    credentials: &dyn CredentialIssuer,
) -> AppResult<()> {
    tag_seeder::seed_tags(tags).await?;
    user_seeder::seed_admin(config, users, credentials).await?;
    Ok(())
}
