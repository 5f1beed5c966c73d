use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;
use crate::models::StoreStats;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub store: StoreStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub status: String,
    pub embedding_dimensions: u32,
}

/// `GET /api/v1/health`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthStatus),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthStatus> {
    let store_status = match state.db.stats().await {
        Ok(_) => "ok",
        Err(_) => "error",
    };

    ApiResponse::success(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: StoreStatus {
            status: store_status.to_string(),
            embedding_dimensions: state.config.documents.embedding_dimensions,
        },
    })
}

/// `GET /api/v1/stats`
///
/// Collection counts for the dashboard KPI cards.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    tag = "health",
    responses(
        (status = 200, description = "Store counts", body = StoreStats),
    )
)]
pub async fn store_stats(State(state): State<AppState>) -> ApiResponse<StoreStats> {
    match state.db.stats().await {
        Ok(stats) => ApiResponse::success(stats),
        Err(e) => e.into(),
    }
}
