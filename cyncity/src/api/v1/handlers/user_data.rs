//! v1 parent record handlers and the read-only telemetry views below them.

use axum::extract::{Path, State};

use crate::api::v1::dto::DeleteUserDataResponse;
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::error::{CyncityError, Result};
use crate::models::{HealthData, LocationData, UserData, WatchData};

fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| CyncityError::Validation(format!("Invalid user data id: {raw}")))
}

/// `GET /api/v1/user-data`
#[utoipa::path(
    get,
    path = "/api/v1/user-data",
    tag = "user-data",
    operation_id = "userData.list",
    responses(
        (status = 200, description = "Parent records, newest first", body = Vec<UserData>),
    )
)]
pub async fn list_user_data(State(state): State<AppState>) -> ApiResponse<Vec<UserData>> {
    match state.db.list_user_data().await {
        Ok(records) => ApiResponse::success(records),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/user-data/{id}`
#[utoipa::path(
    get,
    path = "/api/v1/user-data/{id}",
    tag = "user-data",
    operation_id = "userData.get",
    params(("id" = i64, Path, description = "User data ID")),
    responses(
        (status = 200, description = "Record found", body = UserData),
        (status = 400, description = "Malformed id", body = ApiError),
        (status = 404, description = "Record not found", body = ApiError),
    )
)]
pub async fn get_user_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<UserData> {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    match state.db.get_user_data(id).await {
        Ok(Some(record)) => ApiResponse::success(record),
        Ok(None) => ApiResponse::error(ErrorCode::NotFound, "User data not found"),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/user-data/{id}`
///
/// Removes the record together with its watches and every health and
/// location sample of those watches.
#[utoipa::path(
    delete,
    path = "/api/v1/user-data/{id}",
    tag = "user-data",
    operation_id = "userData.delete",
    params(("id" = i64, Path, description = "User data ID")),
    responses(
        (status = 200, description = "Record and dependents deleted", body = DeleteUserDataResponse),
        (status = 400, description = "Malformed id", body = ApiError),
        (status = 404, description = "Record not found", body = ApiError),
    )
)]
pub async fn delete_user_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<DeleteUserDataResponse> {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    match state.db.delete_user_data(id).await {
        Ok(removed) => ApiResponse::success(DeleteUserDataResponse { ok: true, removed }),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/user-data/{id}/watches`
#[utoipa::path(
    get,
    path = "/api/v1/user-data/{id}/watches",
    tag = "user-data",
    operation_id = "userData.watches",
    params(("id" = i64, Path, description = "User data ID")),
    responses(
        (status = 200, description = "Watches owned by the record", body = Vec<WatchData>),
        (status = 400, description = "Malformed id", body = ApiError),
    )
)]
pub async fn get_user_watches(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<Vec<WatchData>> {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    match state.db.get_user_watches(id).await {
        Ok(watches) => ApiResponse::success(watches),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/user-data/{id}/health`
#[utoipa::path(
    get,
    path = "/api/v1/user-data/{id}/health",
    tag = "user-data",
    operation_id = "userData.health",
    params(("id" = i64, Path, description = "User data ID")),
    responses(
        (status = 200, description = "Health samples across the record's watches, newest first", body = Vec<HealthData>),
        (status = 400, description = "Malformed id", body = ApiError),
    )
)]
pub async fn get_user_health_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<Vec<HealthData>> {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    match state.db.get_user_health_data(id).await {
        Ok(records) => ApiResponse::success(records),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/user-data/{id}/location`
#[utoipa::path(
    get,
    path = "/api/v1/user-data/{id}/location",
    tag = "user-data",
    operation_id = "userData.location",
    params(("id" = i64, Path, description = "User data ID")),
    responses(
        (status = 200, description = "Location samples across the record's watches, newest first", body = Vec<LocationData>),
        (status = 400, description = "Malformed id", body = ApiError),
    )
)]
pub async fn get_user_location_data(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<Vec<LocationData>> {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into(),
    };

    match state.db.get_user_location_data(id).await {
        Ok(records) => ApiResponse::success(records),
        Err(e) => e.into(),
    }
}
