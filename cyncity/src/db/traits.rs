use async_trait::async_trait;
use axum::body::Bytes;

use crate::error::Result;
use crate::models::{
    CascadeReport, Document, Event, EventPatch, HealthData, LocationData, NewDocument, NewEvent,
    NewUser, ServiceFilter, ServicePoint, StoreStats, User, UserData, UserPatch, WatchData,
};

// ---------------------------------------------------------------------------
// Individual store traits
// ---------------------------------------------------------------------------

/// CRUD operations for dashboard users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Newest first.
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn get_user(&self, id: &str) -> Result<Option<User>>;
    async fn create_user(&self, input: NewUser) -> Result<User>;
    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User>;
    async fn delete_user(&self, id: &str) -> Result<()>;
}

/// CRUD and RSVP operations for events.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Insertion order, most recently created first.
    async fn list_events(&self) -> Result<Vec<Event>>;
    async fn get_event(&self, id: &str) -> Result<Option<Event>>;
    async fn create_event(&self, input: NewEvent) -> Result<Event>;
    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event>;
    async fn delete_event(&self, id: &str) -> Result<()>;
    /// Appends `email` unless it is already on the list.
    async fn add_attendee(&self, id: &str, email: &str) -> Result<Event>;
    async fn remove_attendee(&self, id: &str, email: &str) -> Result<Event>;
}

/// Parent records and the telemetry of the watches they own.
#[async_trait]
pub trait UserDataStore: Send + Sync {
    /// Newest first.
    async fn list_user_data(&self) -> Result<Vec<UserData>>;
    async fn get_user_data(&self, id: i64) -> Result<Option<UserData>>;
    /// Removes the record, its watches, and every health/location sample of
    /// those watches in one step.
    async fn delete_user_data(&self, id: i64) -> Result<CascadeReport>;
    async fn get_user_watches(&self, user_id: i64) -> Result<Vec<WatchData>>;
    /// Newest first; empty for an unknown user.
    async fn get_user_health_data(&self, user_id: i64) -> Result<Vec<HealthData>>;
    /// Newest first; empty for an unknown user.
    async fn get_user_location_data(&self, user_id: i64) -> Result<Vec<LocationData>>;
}

/// Dataset documents and their raw bytes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Newest first.
    async fn list_documents(&self) -> Result<Vec<Document>>;
    async fn get_document(&self, id: &str) -> Result<Option<Document>>;
    async fn get_document_content(&self, id: &str) -> Result<Option<(Document, Bytes)>>;
    async fn create_document(&self, input: NewDocument, data: Bytes) -> Result<Document>;
    async fn mark_embedded(&self, id: &str, dimensions: u32) -> Result<Document>;
    async fn delete_document(&self, id: &str) -> Result<()>;
}

/// Read-only service directory.
#[async_trait]
pub trait ServiceStore: Send + Sync {
    async fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<ServicePoint>>;
}

// ---------------------------------------------------------------------------
// Unified backend supertrait
// ---------------------------------------------------------------------------

/// A complete store backend that combines all store traits plus lifecycle
/// operations.
#[async_trait]
pub trait DatabaseBackend:
    UserStore + EventStore + UserDataStore + DocumentStore + ServiceStore
{
    /// Loads sample data. Later calls are no-ops.
    async fn initialize(&self) -> Result<()>;

    async fn stats(&self) -> Result<StoreStats>;
}
