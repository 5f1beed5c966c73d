use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CyncityError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A store operation refused to run because it would break an invariant.
    #[error("Operation failed: {0}")]
    Operation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl CyncityError {
    /// Message that is safe to return to a client.
    pub fn public_message(&self) -> String {
        match self {
            CyncityError::NotFound(msg)
            | CyncityError::Validation(msg)
            | CyncityError::Operation(msg) => msg.clone(),
            CyncityError::Json(e) => format!("Invalid JSON: {e}"),
            CyncityError::Io(_) | CyncityError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CyncityError::NotFound(_) => StatusCode::NOT_FOUND,
            CyncityError::Validation(_) | CyncityError::Operation(_) | CyncityError::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            CyncityError::Io(_) | CyncityError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CyncityError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed with internal error");
        }

        let body = Json(json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, CyncityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_their_message() {
        let err = CyncityError::Validation("Invalid email".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Invalid email");

        let err = CyncityError::Operation("User not found".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_are_masked() {
        let err = CyncityError::Internal("lock poisoned at store.rs:42".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "An internal error occurred");
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = CyncityError::NotFound("Event ev_1 not found".into());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
