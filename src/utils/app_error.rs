use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::repositories::StoreError;
use crate::utils::api_response::ResponseBuilder;

/// Failure returned by every core operation. Each variant carries a machine
/// code for the envelope and a human message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest { code: &'static str, message: String },
    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },
    #[error("{message}")]
    Forbidden { code: &'static str, message: String },
    #[error("{message}")]
    Conflict { code: &'static str, message: String },
    #[error("{message}")]
    NotFound { code: &'static str, message: String },
    #[error("{message}")]
    Internal { code: &'static str, message: String },
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest { code, message: message.into() }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized { code, message: message.into() }
    }

    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        Self::Forbidden { code, message: message.into() }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict { code, message: message.into() }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound { code, message: message.into() }
    }

    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::Internal { code, message: message.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest { code, .. }
            | AppError::Unauthorized { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Internal { code, .. } => code,
        }
    }

    /// Maps a unique violation to `Conflict` with the caller's code; other
    /// store failures convert as usual.
    pub fn on_duplicate(code: &'static str, message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |err| match err {
            StoreError::Duplicate(detail) => {
                tracing::warn!(%detail, code, "unique constraint violated");
                AppError::conflict(code, message)
            }
            other => other.into(),
        }
    }

    /// Maps a foreign key violation to `Conflict` with the caller's code.
    pub fn on_referenced(code: &'static str, message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |err| match err {
            StoreError::Referenced(detail) => {
                tracing::warn!(%detail, code, "row still referenced");
                AppError::conflict(code, message)
            }
            other => other.into(),
        }
    }
}

fn database_error(err: DbErr) -> AppError {
    tracing::error!(error = %err, "database error");
    AppError::internal("DB_ERR", "Database error")
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(detail) => {
                tracing::warn!(%detail, "unique constraint violated");
                AppError::conflict("DUPLICATE", "Resource already exists")
            }
            StoreError::Referenced(detail) => {
                tracing::warn!(%detail, "row still referenced");
                AppError::conflict("IN_USE", "Resource is still referenced")
            }
            StoreError::Db(err) => database_error(err),
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        StoreError::from(err).into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ResponseBuilder::error::<()>(self.status(), self.code(), &self.to_string()).into_response()
    }
}
