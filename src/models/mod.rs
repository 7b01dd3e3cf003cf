pub mod admin_model;
pub mod auth_model;
pub mod submission_model;
pub mod tag_model;
