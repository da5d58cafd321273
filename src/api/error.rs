//--------------------------------------------------------------------------------------------------
// ENUMS
//--------------------------------------------------------------------------------------------------
// | Name            | Description                                      | Key Methods         |
// |-----------------|--------------------------------------------------|---------------------|
// | ApiError        | Error types for the API                          | status, message     |
//--------------------------------------------------------------------------------------------------

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

use crate::domain::services::store::StoreError;

/// Type alias for Result with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// API-specific error types.
///
/// The payload is internal detail for the logs. Clients only ever see the
/// fixed message of the variant.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The request body was missing or not valid JSON
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The requested resource was not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The route exists but does not accept this HTTP method
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The request is well-formed but cannot be processed
    #[error("Unprocessable entity: {0}")]
    Unprocessable(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Message returned to the client.
    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad request",
            Self::NotFound(_) => "resource not found",
            Self::MethodNotAllowed(_) => "method not allowed",
            Self::Unprocessable(_) => "unprocessable",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), "{}", self);

        let body = Json(json!({
            "success": false,
            "error": status.as_u16(),
            "message": self.message(),
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Unprocessable(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::NotFound(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn envelope(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_api_error_display() {
        let not_found = ApiError::NotFound("category 100".to_string());
        assert_eq!(format!("{}", not_found), "Resource not found: category 100");
    }

    #[tokio::test]
    async fn test_envelope_hides_detail() {
        let (status, body) =
            envelope(ApiError::Unprocessable("Database error: disk I/O error".to_string())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({ "success": false, "error": 422, "message": "unprocessable" })
        );
    }

    #[tokio::test]
    async fn test_envelope_codes_and_messages() {
        let cases = [
            (ApiError::BadRequest(String::new()), 400, "bad request"),
            (ApiError::NotFound(String::new()), 404, "resource not found"),
            (ApiError::MethodNotAllowed(String::new()), 405, "method not allowed"),
            (ApiError::Unprocessable(String::new()), 422, "unprocessable"),
        ];

        for (err, code, message) in cases {
            let (status, body) = envelope(err).await;
            assert_eq!(status.as_u16(), code);
            assert_eq!(body["error"], code);
            assert_eq!(body["message"], message);
            assert_eq!(body["success"], false);
        }
    }

    #[test]
    fn test_store_errors_become_unprocessable() {
        let err = ApiError::from(StoreError::ConstraintViolation(
            "FOREIGN KEY constraint failed".to_string(),
        ));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
