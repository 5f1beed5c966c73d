use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cyncity Admin API",
        version = "1.0.0",
        description = "Admin dashboard backend: users, events, parent records with watch telemetry, dataset documents, and the service directory.",
    ),
    paths(
        handlers::health::health_check,
        handlers::health::store_stats,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::users::update_user,
        handlers::users::delete_user,
        handlers::events::list_events,
        handlers::events::create_event,
        handlers::events::get_event,
        handlers::events::update_event,
        handlers::events::delete_event,
        handlers::events::add_attendee,
        handlers::events::remove_attendee,
        handlers::user_data::list_user_data,
        handlers::user_data::get_user_data,
        handlers::user_data::delete_user_data,
        handlers::user_data::get_user_watches,
        handlers::user_data::get_user_health_data,
        handlers::user_data::get_user_location_data,
        handlers::documents::list_documents,
        handlers::documents::upload_document,
        handlers::documents::get_document,
        handlers::documents::mark_embedded,
        handlers::documents::delete_document,
        handlers::services::list_services,
    ),
    components(schemas(
        response::ApiError,
        // Entities
        models::User,
        models::UserRole,
        models::UserStatus,
        models::Event,
        models::UserData,
        models::WatchData,
        models::CaregiverDetail,
        models::HealthData,
        models::LocationData,
        models::CascadeReport,
        models::Document,
        models::DocumentType,
        models::DocumentStatus,
        models::ServicePoint,
        models::ServiceCategory,
        models::StoreStats,
        // Requests and acknowledgements
        dto::CreateUserRequest,
        dto::UpdateUserRequest,
        dto::CreateEventRequest,
        dto::UpdateEventRequest,
        dto::AddAttendeeRequest,
        dto::EmbedDocumentRequest,
        dto::DeleteResponse,
        dto::DeleteUserDataResponse,
        // Health (handler-local types)
        handlers::health::HealthStatus,
        handlers::health::StoreStatus,
    )),
    tags(
        (name = "health", description = "Liveness and dashboard counts"),
        (name = "users", description = "Dashboard user accounts"),
        (name = "events", description = "Events and RSVPs"),
        (name = "user-data", description = "Parent records, watches, and telemetry"),
        (name = "datasets", description = "Dataset documents"),
        (name = "services", description = "Service directory"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
