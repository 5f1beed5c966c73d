use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::CyncityError;

/// `axum::Json` whose rejections answer with the `{ "error": .. }` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(CyncityError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for CyncityError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

fn map_json_rejection(rejection: JsonRejection) -> CyncityError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                CyncityError::Validation(format!("Missing required field: {field}"))
            } else {
                CyncityError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            CyncityError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => {
            CyncityError::Validation("Missing `Content-Type: application/json` header".to_string())
        }
        JsonRejection::BytesRejection(err) => {
            CyncityError::Validation(format!("Failed to read request body: {}", err.body_text()))
        }
        _ => CyncityError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_missing_field_name() {
        let message = "Failed to deserialize the JSON body into the target type: missing field `email` at line 1 column 2";
        assert_eq!(extract_missing_field(message), Some("email"));
        assert_eq!(extract_missing_field("invalid type: integer"), None);
    }
}
