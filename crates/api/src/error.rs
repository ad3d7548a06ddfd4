//! Error responses.
//!
//! Every failure leaves the API as `{ "error": "<message>" }` with the status
//! from [`AppError::status_code`]. Server-side failures are logged here and
//! reach the caller only as a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use tally_core::ValidationError;
use tally_core::auth::PasswordError;
use tally_shared::{AppError, JwtError};
use tally_store::StoreError;

/// Response-producing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 401 with the uniform unauthenticated message.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self(AppError::Unauthorized("Unauthorized".to_string()))
    }

    /// 404 for a named resource.
    #[must_use]
    pub fn not_found(resource: &str) -> Self {
        Self(AppError::NotFound(format!("{resource} not found")))
    }

    /// 400 with a message.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }

    /// 409 with a message.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self(AppError::Conflict(message.into()))
    }

    /// 500 with a detail for the logs.
    #[must_use]
    pub fn internal(detail: impl Into<String>) -> Self {
        Self(AppError::Internal(detail.into()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_internal() {
            error!(code = self.0.error_code(), error = %self.0, "Request failed");
        }

        (status, Json(json!({ "error": self.0.public_message() }))).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::validation(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(AppError::ExternalService(err.to_string()))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("blocking task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let (status, body) = render(ValidationError::NonPositiveAmount.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Amount must be greater than zero"}));
    }

    #[tokio::test]
    async fn test_store_error_is_not_leaked() {
        let err = StoreError::Status {
            status: 502,
            body: "upstream secret detail".into(),
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }

    #[tokio::test]
    async fn test_status_mapping() {
        assert_eq!(render(ApiError::unauthorized()).await.0, StatusCode::UNAUTHORIZED);
        assert_eq!(render(ApiError::not_found("Category")).await.0, StatusCode::NOT_FOUND);
        assert_eq!(render(ApiError::conflict("dup")).await.0, StatusCode::CONFLICT);
    }
}
