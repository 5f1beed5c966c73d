//! v1 dashboard user handlers.

use axum::extract::{Path, State};

use crate::api::extractors::AppJson;
use crate::api::v1::dto::{CreateUserRequest, DeleteResponse, UpdateUserRequest};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::models::{NewUser, User, UserPatch};

/// `GET /api/v1/users`
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    operation_id = "users.list",
    responses(
        (status = 200, description = "Users, newest first", body = Vec<User>),
    )
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResponse<Vec<User>> {
    match state.db.list_users().await {
        Ok(users) => ApiResponse::success(users),
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/users`
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    operation_id = "users.create",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid payload", body = ApiError),
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateUserRequest>,
) -> ApiResponse<User> {
    let input = match NewUser::try_from(req) {
        Ok(input) => input,
        Err(e) => return e.into(),
    };

    match state.db.create_user(input).await {
        Ok(user) => ApiResponse::created(user),
        Err(e) => e.into(),
    }
}

/// `GET /api/v1/users/{id}`
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    operation_id = "users.get",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ApiError),
    )
)]
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse<User> {
    match state.db.get_user(&id).await {
        Ok(Some(user)) => ApiResponse::success(user),
        Ok(None) => ApiResponse::error(ErrorCode::NotFound, "User not found"),
        Err(e) => e.into(),
    }
}

/// `PATCH /api/v1/users/{id}`
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "users",
    operation_id = "users.update",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Invalid payload", body = ApiError),
        (status = 404, description = "User not found", body = ApiError),
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UpdateUserRequest>,
) -> ApiResponse<User> {
    let patch = match UserPatch::try_from(req) {
        Ok(patch) => patch,
        Err(e) => return e.into(),
    };

    match state.db.update_user(&id, patch).await {
        Ok(user) => ApiResponse::success(user),
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/users/{id}`
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    operation_id = "users.delete",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = DeleteResponse),
        (status = 404, description = "User not found", body = ApiError),
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<DeleteResponse> {
    match state.db.delete_user(&id).await {
        Ok(()) => ApiResponse::success(DeleteResponse::ok()),
        Err(e) => e.into(),
    }
}
