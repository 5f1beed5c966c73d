use serde::{Deserialize, Serialize};

/// Collection counts shown on the dashboard KPI cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub users: usize,
    pub active_users: usize,
    pub events: usize,
    pub datasets: usize,
    pub embedded_datasets: usize,
    pub services: usize,
    pub user_data: usize,
    pub watches: usize,
}
