// Shared helpers for the router-level integration tests.
use std::sync::{Arc, Once};

use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;

use cyncity::api::{create_router, AppState};
use cyncity::config::{Config, DocumentsConfig, LogFormat, ServerConfig, StoreConfig};
use cyncity::db::{DatabaseBackend, MemoryBackend};

static INIT: Once = Once::new();

/// Initialize tracing subscriber once for tests
pub fn init_test_logger() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            log_format: LogFormat::Pretty,
        },
        store: StoreConfig { seed: true },
        documents: DocumentsConfig {
            max_upload_size: 64 * 1024,
            embedding_dimensions: 1536,
        },
    }
}

/// Router over a freshly seeded store, plus a handle to that store.
pub async fn seeded_app() -> (Router, Arc<dyn DatabaseBackend>) {
    init_test_logger();
    let db: Arc<dyn DatabaseBackend> = Arc::new(MemoryBackend::new());
    db.initialize().await.expect("seed store");
    (create_router(AppState::new(test_config(), db.clone())), db)
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

/// `multipart/form-data` upload with one `file` part.
pub fn multipart_upload(
    uri: &str,
    file_name: &str,
    content_type: Option<&str>,
    data: &[u8],
) -> Request<Body> {
    let boundary = "----cyncity-integration";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request")
}
