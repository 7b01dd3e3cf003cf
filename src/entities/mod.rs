pub mod otp;
pub mod submission;
pub mod submission_tag;
pub mod tag;
pub mod user;
