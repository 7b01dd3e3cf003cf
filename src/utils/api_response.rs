use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Envelope shared by every endpoint: `{status, code, message, data?}`.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize, Debug)]
pub struct ValidationErrorDetail {
    pub field: String,
    pub title: String,   // validator code, e.g. "is_required", "email"
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    fn new(status: ResponseStatus, code: &str, message: &str, data: Option<T>) -> Self {
        Self {
            status,
            code: code.to_string(),
            message: message.to_string(),
            data,
        }
    }
}

pub struct ApiResponseResult<T>(pub StatusCode, pub ApiResponse<T>);

impl<T: Serialize> IntoResponse for ApiResponseResult<T> {
    fn into_response(self) -> Response {
        (self.0, Json(self.1)).into_response()
    }
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    pub fn success<T: Serialize>(code: &str, message: &str, data: T) -> ApiResponseResult<T> {
        ApiResponseResult(
            StatusCode::OK,
            ApiResponse::new(ResponseStatus::Success, code, message, Some(data)),
        )
    }

    pub fn created<T: Serialize>(code: &str, message: &str, data: T) -> ApiResponseResult<T> {
        ApiResponseResult(
            StatusCode::CREATED,
            ApiResponse::new(ResponseStatus::Success, code, message, Some(data)),
        )
    }

    /// Success without a payload (`data` omitted).
    pub fn message(code: &str, message: &str) -> ApiResponseResult<()> {
        ApiResponseResult(
            StatusCode::OK,
            ApiResponse::new(ResponseStatus::Success, code, message, None),
        )
    }

    pub fn error<T: Serialize>(status_code: StatusCode, code: &str, message: &str) -> ApiResponseResult<T> {
        ApiResponseResult(
            status_code,
            ApiResponse::new(ResponseStatus::Error, code, message, None),
        )
    }

    pub fn fail_with_data<T: Serialize>(
        status_code: StatusCode,
        code: &str,
        message: &str,
        data: T,
    ) -> ApiResponseResult<T> {
        ApiResponseResult(
            status_code,
            ApiResponse::new(ResponseStatus::Error, code, message, Some(data)),
        )
    }
}
