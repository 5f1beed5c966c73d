use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

/// Room for multipart boundaries and part headers around the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn v1_router(state: &AppState) -> Router<AppState> {
    let upload_limit = state
        .config
        .documents
        .max_upload_size
        .saturating_add(MULTIPART_OVERHEAD);

    let users = Router::new()
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .patch(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        );

    let events = Router::new()
        .route(
            "/",
            get(handlers::events::list_events).post(handlers::events::create_event),
        )
        .route(
            "/{id}",
            get(handlers::events::get_event)
                .patch(handlers::events::update_event)
                .delete(handlers::events::delete_event),
        )
        .route("/{id}/attendees", post(handlers::events::add_attendee))
        .route(
            "/{id}/attendees/{email}",
            delete(handlers::events::remove_attendee),
        );

    let user_data = Router::new()
        .route("/", get(handlers::user_data::list_user_data))
        .route(
            "/{id}",
            get(handlers::user_data::get_user_data).delete(handlers::user_data::delete_user_data),
        )
        .route("/{id}/watches", get(handlers::user_data::get_user_watches))
        .route("/{id}/health", get(handlers::user_data::get_user_health_data))
        .route(
            "/{id}/location",
            get(handlers::user_data::get_user_location_data),
        );

    let documents = Router::new()
        .route(
            "/",
            get(handlers::documents::list_documents).post(handlers::documents::upload_document),
        )
        .route(
            "/{id}",
            get(handlers::documents::get_document)
                .patch(handlers::documents::mark_embedded)
                .delete(handlers::documents::delete_document),
        )
        .layer(DefaultBodyLimit::max(upload_limit));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/stats", get(handlers::store_stats))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
        .nest("/users", users)
        .nest("/events", events)
        .nest("/user-data", user_data)
        .nest("/datasets/docs", documents)
        .route("/services", get(handlers::services::list_services))
}
