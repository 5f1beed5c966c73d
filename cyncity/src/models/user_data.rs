use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parent/guardian account that owns one or more watches.
///
/// Credential fields are kept in the store but never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: i64,
    pub parent_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    pub is_verified: bool,
    #[serde(skip_serializing, default)]
    pub verification_token: Option<String>,
    pub phone_number: Option<String>,
    #[serde(skip_serializing, default)]
    pub reset_password_token: Option<String>,
    #[schema(value_type = Option<String>)]
    pub reset_password_expiry: Option<DateTime<Utc>>,
    #[serde(skip_serializing, default)]
    pub refresh_token: Option<String>,
    #[schema(value_type = Vec<String>)]
    pub watch_ids: Vec<Uuid>,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl UserData {
    pub fn owns_watch(&self, watch_id: &Uuid) -> bool {
        self.watch_ids.contains(watch_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaregiverDetail {
    pub name: String,
    pub relation: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WatchData {
    pub id: i64,
    #[schema(value_type = String)]
    pub watch_id: Uuid,
    pub name: String,
    pub brand: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    pub phone_number: Option<String>,
    pub caregiver_details: Vec<CaregiverDetail>,
    pub caregiver_phone_numbers: Option<String>,
    #[serde(skip_serializing, default)]
    pub refresh_token: Option<String>,
    /// Owning [`UserData::id`].
    pub user_id: i64,
}

/// One daily health sample reported by a watch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub id: i64,
    #[schema(value_type = String)]
    pub watch_id: Uuid,
    pub step_count: Option<u32>,
    pub heart_rate: Option<u32>,
    pub active_calories: Option<u32>,
    pub blood_oxygen: Option<u32>,
    pub sleep_hours: Option<f64>,
    pub distance: Option<f64>,
    pub resting_heart_rate: Option<u32>,
    pub floors_climbed: Option<u32>,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationData {
    pub id: i64,
    #[schema(value_type = String)]
    pub watch_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub location: Option<String>,
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
}

/// Child records removed alongside a [`UserData`] record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    pub watches: usize,
    pub health_records: usize,
    pub location_records: usize,
}
