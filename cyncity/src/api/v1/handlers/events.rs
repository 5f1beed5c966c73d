//! v1 event handlers, including RSVP list maintenance.

use axum::extract::{Path, State};

use crate::api::extractors::AppJson;
use crate::api::v1::dto::{
    AddAttendeeRequest, CreateEventRequest, DeleteResponse, UpdateEventRequest,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::models::{Event, EventPatch, NewEvent};
use crate::validation::normalize_email;

/// `GET /api/v1/events`
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "events",
    operation_id = "events.list",
    responses(
        (status = 200, description = "Events, most recently created first", body = Vec<Event>),
    )
)]
pub async fn list_events(State(state): State<AppState>) -> ApiResponse<Vec<Event>> {
    match state.db.list_events().await {
        Ok(events) => ApiResponse::success(events),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/events`
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "events",
    operation_id = "events.create",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Invalid payload", body = ApiError),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateEventRequest>,
) -> ApiResponse<Event> {
    let input = match NewEvent::try_from(req) {
        Ok(input) => input,
        Err(e) => return e.into(),
    };

    match state.db.create_event(input).await {
        Ok(event) => ApiResponse::created(event),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/events/{id}`
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "events",
    operation_id = "events.get",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found", body = ApiError),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<Event> {
    match state.db.get_event(&id).await {
        Ok(Some(event)) => ApiResponse::success(event),
        Ok(None) => ApiResponse::error(ErrorCode::NotFound, "Event not found"),
        Err(e) => e.into(),
    }
}

/// `PATCH /api/v1/events/{id}`
#[utoipa::path(
    patch,
    path = "/api/v1/events/{id}",
    tag = "events",
    operation_id = "events.update",
    params(("id" = String, Path, description = "Event ID")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Invalid payload", body = ApiError),
        (status = 404, description = "Event not found", body = ApiError),
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateEventRequest>,
) -> ApiResponse<Event> {
    let patch = match EventPatch::try_from(req) {
        Ok(patch) => patch,
        Err(e) => return e.into(),
    };

    match state.db.update_event(&id, patch).await {
        Ok(event) => ApiResponse::success(event),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/events/{id}`
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    tag = "events",
    operation_id = "events.delete",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted", body = DeleteResponse),
        (status = 404, description = "Event not found", body = ApiError),
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<DeleteResponse> {
    match state.db.delete_event(&id).await {
        Ok(()) => ApiResponse::success(DeleteResponse::ok()),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/events/{id}/attendees`
///
/// RSVP. Adding an email that is already on the list is a no-op.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/attendees",
    tag = "events",
    operation_id = "events.attendees.add",
    params(("id" = String, Path, description = "Event ID")),
    request_body = AddAttendeeRequest,
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 400, description = "Invalid email", body = ApiError),
        (status = 404, description = "Event not found", body = ApiError),
    )
)]
pub async fn add_attendee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<AddAttendeeRequest>,
) -> ApiResponse<Event> {
    let email = match req.into_email() {
        Ok(email) => email,
        Err(e) => return e.into(),
    };

    match state.db.add_attendee(&id, &email).await {
        Ok(event) => ApiResponse::success(event),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/events/{id}/attendees/{email}`
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}/attendees/{email}",
    tag = "events",
    operation_id = "events.attendees.remove",
    params(
        ("id" = String, Path, description = "Event ID"),
        ("email" = String, Path, description = "Attendee email"),
    ),
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 404, description = "Event or attendee not found", body = ApiError),
    )
)]
pub async fn remove_attendee(
    State(state): State<AppState>,
    Path((id, email)): Path<(String, String)>,
) -> ApiResponse<Event> {
    match state.db.remove_attendee(&id, &normalize_email(&email)).await {
        Ok(event) => ApiResponse::success(event),
        Err(e) => e.into(),
    }
}
