//! End-to-end workflows through the full router.
//!
//! Run with: cargo test --test api_integration_test

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use common::{body_json, json_request, multipart_upload, request, seeded_app, test_config};
use cyncity::api::{create_router, AppState};
use cyncity::db::{DatabaseBackend, MemoryBackend};

#[tokio::test]
async fn new_user_is_listed_first_until_deleted() {
    let (app, _) = seeded_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            json!({
                "name": "Grace Hopper",
                "email": "grace@example.com",
                "role": "admin",
                "status": "active"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("u_"));

    let users = body_json(
        app.clone()
            .oneshot(request("GET", "/api/v1/users"))
            .await
            .unwrap(),
    )
    .await;
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 4);
    assert_eq!(users[0]["id"], id.as_str());

    let response = app
        .clone()
        .oneshot(request("DELETE", &format!("/api/v1/users/{id}")))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!({ "ok": true }));

    let response = app
        .oneshot(request("GET", &format!("/api/v1/users/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "User not found" }));
}

#[tokio::test]
async fn missing_fields_are_reported_in_field_order() {
    let (app, _) = seeded_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/v1/users", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Name is required");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/users",
            json!({ "name": "Linus", "email": "linus@example.com", "role": "viewer" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Status is required");
}

#[tokio::test]
async fn event_update_replaces_attendees() {
    let (app, _) = seeded_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/events",
            json!({
                "title": "Clean-up Day",
                "venue": "Riverside Park",
                "date": "2026-11-14",
                "time": "09:30",
                "organizer": "Parks Dept",
                "agenda": "Litter pick and planting",
                "attendees": ["a@example.com"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let events = body_json(
        app.clone()
            .oneshot(request("GET", "/api/v1/events"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(events[0]["id"], id.as_str());

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/events/{id}"),
            json!({ "attendees": ["b@example.com", "c@example.com"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Clean-up Day");
    assert_eq!(updated["attendees"], json!(["b@example.com", "c@example.com"]));

    let response = app
        .oneshot(request(
            "DELETE",
            &format!("/api/v1/events/{id}/attendees/a@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Attendee not found");
}

#[tokio::test]
async fn rsvp_with_invalid_email_is_rejected() {
    let (app, _) = seeded_app().await;
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/events/ev_1/attendees",
            json!({ "email": "not-an-email" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/events/ev_missing/attendees",
            json!({ "email": "guest@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cascade_delete_empties_every_telemetry_view() {
    let (app, _) = seeded_app().await;

    let response = app
        .clone()
        .oneshot(request("DELETE", "/api/v1/user-data/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["removed"]["watches"], 2);
    assert_eq!(json["removed"]["healthRecords"], 14);
    assert_eq!(json["removed"]["locationRecords"], 6);

    for view in ["watches", "health", "location"] {
        let response = app
            .clone()
            .oneshot(request("GET", &format!("/api/v1/user-data/1/{view}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "view {view}");
        assert_eq!(body_json(response).await, json!([]), "view {view}");
    }

    let response = app
        .clone()
        .oneshot(request("GET", "/api/v1/user-data/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let remaining = body_json(
        app.clone()
            .oneshot(request("GET", "/api/v1/user-data"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(remaining.as_array().unwrap().len(), 2);

    let stats = body_json(app.oneshot(request("GET", "/api/v1/stats")).await.unwrap()).await;
    assert_eq!(stats["userData"], 2);
    assert_eq!(stats["watches"], 1);
}

#[tokio::test]
async fn telemetry_is_newest_first() {
    let (app, _) = seeded_app().await;
    let health = body_json(
        app.oneshot(request("GET", "/api/v1/user-data/1/health"))
            .await
            .unwrap(),
    )
    .await;
    let stamps: Vec<chrono::DateTime<chrono::FixedOffset>> = health
        .as_array()
        .unwrap()
        .iter()
        .map(|r| chrono::DateTime::parse_from_rfc3339(r["timestamp"].as_str().unwrap()).unwrap())
        .collect();
    assert_eq!(stamps.len(), 14);
    let mut sorted = stamps.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(stamps, sorted);
}

#[tokio::test]
async fn uploads_update_document_list_and_stats() {
    let (app, _) = seeded_app().await;

    let first = app
        .clone()
        .oneshot(multipart_upload(
            "/api/v1/datasets/docs",
            "notes.txt",
            Some("text/plain"),
            b"first",
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await;

    let second = app
        .clone()
        .oneshot(multipart_upload("/api/v1/datasets/docs", "brief.pdf", None, b"%PDF-1.7\nsecond"))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CREATED);
    let second = body_json(second).await;
    assert_eq!(second["type"], "application/pdf");

    let docs = body_json(
        app.clone()
            .oneshot(request("GET", "/api/v1/datasets/docs"))
            .await
            .unwrap(),
    )
    .await;
    let ids: HashSet<&str> = docs
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(first["id"].as_str().unwrap()));
    assert!(ids.contains(second["id"].as_str().unwrap()));

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/datasets/docs/{}", first["id"].as_str().unwrap()),
            json!({ "dimensions": 384 }),
        ))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["embeddingDim"], 384);

    let stats = body_json(app.oneshot(request("GET", "/api/v1/stats")).await.unwrap()).await;
    assert_eq!(stats["datasets"], 2);
    assert_eq!(stats["embeddedDatasets"], 1);
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let (app, _) = seeded_app().await;
    let response = app
        .oneshot(request("POST", "/api/v1/datasets/docs"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn services_text_search_spans_tags_and_location() {
    let (app, _) = seeded_app().await;

    let by_tag = body_json(
        app.clone()
            .oneshot(request("GET", "/api/v1/services?q=BLOODWORK"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(by_tag.as_array().unwrap().len(), 1);
    assert_eq!(by_tag[0]["name"], "Precise Diagnostics");

    let by_location = body_json(
        app.clone()
            .oneshot(request("GET", "/api/v1/services?category=all&q=springfield"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(by_location.as_array().unwrap().len(), 3);

    let none = body_json(
        app.oneshot(request("GET", "/api/v1/services?category=Points%20of%20Sale&q=rx"))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn unseeded_store_starts_empty() {
    common::init_test_logger();
    let db: Arc<dyn DatabaseBackend> = Arc::new(MemoryBackend::new());
    let app = create_router(AppState::new(test_config(), db));

    for path in ["/api/v1/users", "/api/v1/events", "/api/v1/user-data", "/api/v1/services"] {
        let response = app.clone().oneshot(request("GET", path)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "path {path}");
        assert_eq!(body_json(response).await, json!([]), "path {path}");
    }
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let (app, _) = seeded_app().await;

    let mut handles = Vec::new();
    for i in 0..25 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let response = app
                .oneshot(json_request(
                    "POST",
                    "/api/v1/users",
                    json!({
                        "name": format!("Load User {i}"),
                        "email": format!("load{i}@example.com"),
                        "role": "viewer",
                        "status": "suspended"
                    }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
            body_json(response).await["id"].as_str().unwrap().to_string()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        ids.insert(handle.await.unwrap());
    }
    assert_eq!(ids.len(), 25);

    let users = body_json(app.oneshot(request("GET", "/api/v1/users")).await.unwrap()).await;
    assert_eq!(users.as_array().unwrap().len(), 28);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _) = seeded_app().await;
    let response = app.oneshot(request("GET", "/api/v1/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
