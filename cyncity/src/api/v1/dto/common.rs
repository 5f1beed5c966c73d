use serde::{Deserialize, Serialize};

use crate::models::CascadeReport;

/// Body returned by delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub ok: bool,
}

impl DeleteResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Body returned by `DELETE /api/v1/user-data/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteUserDataResponse {
    pub ok: bool,
    /// Dependent records removed with the parent record.
    pub removed: CascadeReport,
}
