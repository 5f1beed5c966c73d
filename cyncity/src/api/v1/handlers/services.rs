use axum::extract::State;
use axum_extra::extract::Query;

use crate::api::v1::dto::ServicesQuery;
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::models::{ServiceFilter, ServicePoint};

/// `GET /api/v1/services`
#[utoipa::path(
    get,
    path = "/api/v1/services",
    tag = "services",
    operation_id = "services.list",
    params(ServicesQuery),
    responses(
        (status = 200, description = "Matching service points", body = Vec<ServicePoint>),
        (status = 400, description = "Unknown category", body = ApiError),
    )
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(query): Query<ServicesQuery>,
) -> ApiResponse<Vec<ServicePoint>> {
    let filter = match ServiceFilter::try_from(query) {
        Ok(filter) => filter,
        Err(e) => return e.into(),
    };

    match state.db.list_services(&filter).await {
        Ok(points) => ApiResponse::success(points),
        Err(e) => e.into(),
    }
}
