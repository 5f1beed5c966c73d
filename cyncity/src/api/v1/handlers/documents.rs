//! v1 dataset document handlers.
//!
//! Uploads arrive as multipart forms and are stored with their raw bytes.
//! Retrieval streams those bytes back with content headers instead of JSON.
//! Embedding is simulated: the document is only flagged with a dimension.

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::Query;

use crate::api::v1::dto::{DeleteResponse, DownloadQuery, EmbedDocumentRequest};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::error::Result;
use crate::models::{Document, DocumentMeta, NewDocument};
use crate::validation::OrderedValidate;

const OCTET_STREAM: &str = "application/octet-stream";

fn parse_form_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `?download` counts when present, non-empty, and not an explicit false.
fn wants_download(flag: Option<&str>) -> bool {
    match flag.map(str::trim) {
        None | Some("") => false,
        Some(raw) => parse_form_bool(raw) != Some(false),
    }
}

/// File name safe to place inside a quoted `Content-Disposition` parameter.
/// Quotes and backslashes would end or escape the quoted-string early.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(*c, '"' | '\\') && !c.is_control())
        .collect();
    if cleaned.trim().is_empty() {
        "download".to_string()
    } else {
        cleaned
    }
}

/// MIME type of an upload. A declared, specific part type wins; otherwise the
/// bytes are sniffed, then the file extension is consulted.
fn resolve_content_type(declared: Option<&str>, file_name: &str, bytes: &[u8]) -> String {
    if let Some(declared) = declared
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && !ct.eq_ignore_ascii_case(OCTET_STREAM))
    {
        return declared.to_string();
    }

    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }

    mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

/// `GET /api/v1/datasets/docs`
#[utoipa::path(
    get,
    path = "/api/v1/datasets/docs",
    tag = "datasets",
    operation_id = "datasets.docs.list",
    responses(
        (status = 200, description = "Documents, newest first", body = Vec<Document>),
    )
)]
pub async fn list_documents(State(state): State<AppState>) -> ApiResponse<Vec<Document>> {
    match state.db.list_documents().await {
        Ok(docs) => ApiResponse::success(docs),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/datasets/docs`
///
/// Accepts a multipart form with exactly one `file` field.
#[utoipa::path(
    post,
    path = "/api/v1/datasets/docs",
    tag = "datasets",
    operation_id = "datasets.docs.upload",
    request_body(content_type = "multipart/form-data", content = String, description = "Form with a single `file` field"),
    responses(
        (status = 201, description = "Document stored", body = Document),
        (status = 400, description = "Missing, duplicate, oversized, or unsupported file", body = ApiError),
    )
)]
pub async fn upload_document(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> ApiResponse<Document> {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                format!("Expected a multipart form: {}", e.body_text()),
            );
        }
    };

    let max_size = state.config.documents.max_upload_size;
    let mut upload: Option<(String, Option<String>, Bytes)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return ApiResponse::error(
                    ErrorCode::InvalidRequest,
                    format!("Failed to read form: {}", e.body_text()),
                );
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        if upload.is_some() {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                "Only one 'file' field is allowed",
            );
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);

        let bytes = match field.bytes().await {
            Ok(b) => b,
            Err(e) => {
                return ApiResponse::error(
                    ErrorCode::InvalidRequest,
                    format!("Failed to read file: {}", e.body_text()),
                );
            }
        };

        if bytes.len() > max_size {
            return ApiResponse::error(
                ErrorCode::InvalidRequest,
                format!(
                    "File too large: {} bytes (max {} bytes)",
                    bytes.len(),
                    max_size
                ),
            );
        }

        upload = Some((file_name, content_type, bytes));
    }

    let (name, declared_type, bytes) = match upload {
        Some(upload) => upload,
        None => {
            return ApiResponse::error(ErrorCode::InvalidRequest, "Missing required 'file' field");
        }
    };

    let meta = DocumentMeta {
        content_type: resolve_content_type(declared_type.as_deref(), &name, &bytes),
        size: bytes.len() as u64,
        name,
    };
    let input = match NewDocument::try_from(meta) {
        Ok(input) => input,
        Err(e) => return e.into(),
    };

    match state.db.create_document(input, bytes).await {
        Ok(doc) => ApiResponse::created(doc),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/datasets/docs/{id}`
///
/// Returns the stored bytes. With `?download=1` the response also names the
/// file in `Content-Disposition`.
#[utoipa::path(
    get,
    path = "/api/v1/datasets/docs/{id}",
    tag = "datasets",
    operation_id = "datasets.docs.get",
    params(("id" = String, Path, description = "Document ID"), DownloadQuery),
    responses(
        (status = 200, description = "Raw document bytes", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 404, description = "Document not found", body = ApiError),
    )
)]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    let (doc, data) = match state.db.get_document_content(&id).await {
        Ok(Some(found)) => found,
        Ok(None) => {
            return ApiResponse::<()>::error(ErrorCode::NotFound, "Document not found")
                .into_response();
        }
        Err(e) => return ApiResponse::<()>::from(e).into_response(),
    };

    let length = data.len();
    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(doc.doc_type.mime()));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(length));

    if wants_download(query.download.as_deref()) {
        let disposition = format!(
            "attachment; filename=\"{}\"",
            sanitize_filename(&doc.name)
        );
        let value = HeaderValue::from_bytes(disposition.as_bytes())
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
        headers.insert(CONTENT_DISPOSITION, value);
    }

    response
}

fn parse_embed_request(body: &[u8]) -> Result<EmbedDocumentRequest> {
    let req = if body.iter().all(u8::is_ascii_whitespace) {
        EmbedDocumentRequest::default()
    } else {
        serde_json::from_slice(body)?
    };
    req.validate_ordered()?;
    Ok(req)
}

/// `PATCH /api/v1/datasets/docs/{id}`
///
/// Marks the document as embedded. The body is optional.
#[utoipa::path(
    patch,
    path = "/api/v1/datasets/docs/{id}",
    tag = "datasets",
    operation_id = "datasets.docs.embed",
    params(("id" = String, Path, description = "Document ID")),
    request_body(content = EmbedDocumentRequest, content_type = "application/json", description = "Optional; an empty body uses the configured dimension"),
    responses(
        (status = 200, description = "Document marked embedded", body = Document),
        (status = 400, description = "Invalid body", body = ApiError),
        (status = 404, description = "Document not found", body = ApiError),
    )
)]
pub async fn mark_embedded(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResponse<Document> {
    let req = match parse_embed_request(&body) {
        Ok(req) => req,
        Err(e) => return e.into(),
    };
    let dimensions = req
        .dimensions
        .unwrap_or(state.config.documents.embedding_dimensions);

    match state.db.mark_embedded(&id, dimensions).await {
        Ok(doc) => ApiResponse::success(doc),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/datasets/docs/{id}`
#[utoipa::path(
    delete,
    path = "/api/v1/datasets/docs/{id}",
    tag = "datasets",
    operation_id = "datasets.docs.delete",
    params(("id" = String, Path, description = "Document ID")),
    responses(
        (status = 200, description = "Document deleted", body = DeleteResponse),
        (status = 404, description = "Document not found", body = ApiError),
    )
)]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<DeleteResponse> {
    match state.db.delete_document(&id).await {
        Ok(()) => ApiResponse::success(DeleteResponse::ok()),
        Err(e) => e.into(),
    }
}
