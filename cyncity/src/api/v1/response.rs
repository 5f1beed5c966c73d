//! # V1 response contract
//!
//! Successful calls return the entity (or list of entities) as the bare JSON
//! body. Failed calls return a single-field object:
//!
//! ```json
//! { "error": "Name must be at least 2 characters" }
//! ```
//!
//! The HTTP status carries the error class, see [`ErrorCode::status`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::CyncityError;

/// Error classes exposed by the API. Only the status reaches the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Payload failed validation or an operation was refused. HTTP 400.
    InvalidRequest,
    /// HTTP 404.
    NotFound,
    /// Unexpected failure. Details are logged, never returned. HTTP 500.
    InternalError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub error: String,
}

/// Handler return type: either a payload with a success status, or an
/// [`ApiError`] with the status of its [`ErrorCode`].
#[derive(Debug, Clone)]
pub struct ApiResponse<T: Serialize> {
    data: Option<T>,
    error: Option<ApiError>,
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// HTTP 200.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// HTTP 201.
    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::CREATED,
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(ApiError {
                error: message.into(),
            }),
            status: code.status(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        let body = match (self.error, self.data) {
            (Some(error), _) => serde_json::to_value(error),
            (None, Some(data)) => serde_json::to_value(data),
            (None, None) => Ok(serde_json::Value::Null),
        };

        match body {
            Ok(body) => (status, Json(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response body");
                let body = serde_json::json!({ "error": "An internal error occurred" });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<CyncityError> for ApiResponse<T> {
    /// Internal details are never sent to the client; they are logged with
    /// `tracing::error!` instead.
    fn from(err: CyncityError) -> Self {
        match err {
            CyncityError::NotFound(msg) => ApiResponse::error(ErrorCode::NotFound, msg),
            CyncityError::Validation(msg) | CyncityError::Operation(msg) => {
                ApiResponse::error(ErrorCode::InvalidRequest, msg)
            }
            CyncityError::Json(e) => {
                ApiResponse::error(ErrorCode::InvalidRequest, format!("Invalid JSON: {e}"))
            }
            internal @ (CyncityError::Io(_) | CyncityError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_body_is_the_payload() {
        let response = ApiResponse::success(serde_json::json!({ "id": "u_1" })).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!({ "id": "u_1" }));
    }

    #[tokio::test]
    async fn error_body_has_single_field() {
        let response = ApiResponse::<()>::error(ErrorCode::NotFound, "gone").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, serde_json::json!({ "error": "gone" }));
    }

    #[test]
    fn created_response_has_201_status() {
        assert_eq!(ApiResponse::created("new").status(), StatusCode::CREATED);
    }

    #[test]
    fn error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn operation_errors_are_client_errors() {
        let resp: ApiResponse<()> = CyncityError::Operation("size mismatch".into()).into();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.error.expect("error").error, "size mismatch");
    }

    #[test]
    fn internal_errors_do_not_leak() {
        let resp: ApiResponse<()> = CyncityError::Internal("secret debug info".into()).into();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.error.expect("error").error, "An internal error occurred");
    }
}
