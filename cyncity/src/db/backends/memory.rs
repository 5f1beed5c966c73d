use async_trait::async_trait;
use axum::body::Bytes;
use chrono::Utc;
use nanoid::nanoid;
use tokio::sync::RwLock;

use crate::db::seed::SeedData;
use crate::db::traits::{
    DatabaseBackend, DocumentStore, EventStore, ServiceStore, UserDataStore, UserStore,
};
use crate::error::{CyncityError, Result};
use crate::models::{
    CascadeReport, Document, DocumentStatus, Event, EventPatch, HealthData, LocationData,
    NewDocument, NewEvent, NewUser, ServiceFilter, ServicePoint, StoreStats, User, UserData,
    UserPatch, UserStatus, WatchData,
};

const SHORT_ID_LEN: usize = 6;
const SHORT_ID_ALPHABET: [char; 36] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

struct StoredDocument {
    meta: Document,
    data: Bytes,
}

#[derive(Default)]
struct Collections {
    users: Vec<User>,
    events: Vec<Event>,
    user_data: Vec<UserData>,
    watches: Vec<WatchData>,
    health_data: Vec<HealthData>,
    location_data: Vec<LocationData>,
    documents: Vec<StoredDocument>,
    services: Vec<ServicePoint>,
    seeded: bool,
}

impl Collections {
    fn load(&mut self, seed: SeedData) {
        self.users.extend(seed.users);
        self.events.extend(seed.events);
        self.user_data.extend(seed.user_data);
        self.watches.extend(seed.watches);
        self.health_data.extend(seed.health_data);
        self.location_data.extend(seed.location_data);
        self.services.extend(seed.services);
        self.seeded = true;
    }

    fn user_mut(&mut self, id: &str) -> Result<&mut User> {
        self.users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| CyncityError::NotFound("User not found".to_string()))
    }

    fn event_mut(&mut self, id: &str) -> Result<&mut Event> {
        self.events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CyncityError::NotFound("Event not found".to_string()))
    }

    fn document_mut(&mut self, id: &str) -> Result<&mut StoredDocument> {
        self.documents
            .iter_mut()
            .find(|d| d.meta.id == id)
            .ok_or_else(|| CyncityError::NotFound("Document not found".to_string()))
    }

    fn owner(&self, user_id: i64) -> Option<&UserData> {
        self.user_data.iter().find(|u| u.id == user_id)
    }
}

/// Prefixed short id that is not taken yet according to `taken`.
fn short_id(prefix: &str, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = format!("{prefix}{}", nanoid!(SHORT_ID_LEN, &SHORT_ID_ALPHABET));
        if !taken(&id) {
            return id;
        }
    }
}

/// In-process store. One lock guards every collection, so multi-collection
/// operations such as the user-data cascade are atomic to other requests.
#[derive(Default)]
pub struct MemoryBackend {
    inner: RwLock<Collections>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryBackend {
    async fn list_users(&self) -> Result<Vec<User>> {
        let store = self.inner.read().await;
        let mut users = store.users.clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>> {
        let store = self.inner.read().await;
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }

    async fn create_user(&self, input: NewUser) -> Result<User> {
        let mut store = self.inner.write().await;
        let id = short_id("u_", |id| store.users.iter().any(|u| u.id == id));
        let user = User {
            id,
            name: input.name,
            email: input.email,
            role: input.role,
            status: input.status,
            created_at: Utc::now(),
        };
        store.users.insert(0, user.clone());
        tracing::info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: &str, patch: UserPatch) -> Result<User> {
        let mut store = self.inner.write().await;
        let user = store.user_mut(id)?;
        user.apply(patch);
        tracing::info!(user_id = %id, "User updated");
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> Result<()> {
        let mut store = self.inner.write().await;
        let before = store.users.len();
        store.users.retain(|u| u.id != id);
        if store.users.len() == before {
            return Err(CyncityError::NotFound("User not found".to_string()));
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[async_trait]
impl EventStore for MemoryBackend {
    async fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.inner.read().await.events.clone())
    }

    async fn get_event(&self, id: &str) -> Result<Option<Event>> {
        let store = self.inner.read().await;
        Ok(store.events.iter().find(|e| e.id == id).cloned())
    }

    async fn create_event(&self, input: NewEvent) -> Result<Event> {
        let mut store = self.inner.write().await;
        let id = short_id("ev_", |id| store.events.iter().any(|e| e.id == id));
        let event = Event {
            id,
            title: input.title,
            venue: input.venue,
            date: input.date,
            time: input.time,
            organizer: input.organizer,
            agenda: input.agenda,
            attendees: input.attendees,
        };
        store.events.insert(0, event.clone());
        tracing::info!(event_id = %event.id, date = %event.date, "Event created");
        Ok(event)
    }

    async fn update_event(&self, id: &str, patch: EventPatch) -> Result<Event> {
        let mut store = self.inner.write().await;
        let event = store.event_mut(id)?;
        event.apply(patch);
        tracing::info!(event_id = %id, "Event updated");
        Ok(event.clone())
    }

    async fn delete_event(&self, id: &str) -> Result<()> {
        let mut store = self.inner.write().await;
        let before = store.events.len();
        store.events.retain(|e| e.id != id);
        if store.events.len() == before {
            return Err(CyncityError::NotFound("Event not found".to_string()));
        }
        tracing::info!(event_id = %id, "Event deleted");
        Ok(())
    }

    async fn add_attendee(&self, id: &str, email: &str) -> Result<Event> {
        let mut store = self.inner.write().await;
        let event = store.event_mut(id)?;
        if !event.has_attendee(email) {
            event.attendees.push(email.to_string());
            tracing::info!(event_id = %id, attendees = event.attendees.len(), "Attendee added");
        }
        Ok(event.clone())
    }

    async fn remove_attendee(&self, id: &str, email: &str) -> Result<Event> {
        let mut store = self.inner.write().await;
        let event = store.event_mut(id)?;
        let position = event
            .attendees
            .iter()
            .position(|a| a.eq_ignore_ascii_case(email))
            .ok_or_else(|| CyncityError::NotFound("Attendee not found".to_string()))?;
        event.attendees.remove(position);
        tracing::info!(event_id = %id, attendees = event.attendees.len(), "Attendee removed");
        Ok(event.clone())
    }
}

#[async_trait]
impl UserDataStore for MemoryBackend {
    async fn list_user_data(&self) -> Result<Vec<UserData>> {
        let store = self.inner.read().await;
        let mut records = store.user_data.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn get_user_data(&self, id: i64) -> Result<Option<UserData>> {
        Ok(self.inner.read().await.owner(id).cloned())
    }

    async fn delete_user_data(&self, id: i64) -> Result<CascadeReport> {
        let mut store = self.inner.write().await;

        let watch_ids = match store.owner(id) {
            Some(record) => record.watch_ids.clone(),
            None => return Err(CyncityError::NotFound("User data not found".to_string())),
        };

        let mut report = CascadeReport::default();

        let before = store.watches.len();
        store.watches.retain(|w| w.user_id != id);
        report.watches = before - store.watches.len();

        let before = store.health_data.len();
        store.health_data.retain(|h| !watch_ids.contains(&h.watch_id));
        report.health_records = before - store.health_data.len();

        let before = store.location_data.len();
        store.location_data.retain(|l| !watch_ids.contains(&l.watch_id));
        report.location_records = before - store.location_data.len();

        store.user_data.retain(|u| u.id != id);

        tracing::info!(
            user_data_id = id,
            watches = report.watches,
            health_records = report.health_records,
            location_records = report.location_records,
            "User data deleted with dependents"
        );
        Ok(report)
    }

    async fn get_user_watches(&self, user_id: i64) -> Result<Vec<WatchData>> {
        let store = self.inner.read().await;
        Ok(store
            .watches
            .iter()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_user_health_data(&self, user_id: i64) -> Result<Vec<HealthData>> {
        let store = self.inner.read().await;
        let Some(owner) = store.owner(user_id) else {
            return Ok(Vec::new());
        };
        let mut records: Vec<HealthData> = store
            .health_data
            .iter()
            .filter(|h| owner.owns_watch(&h.watch_id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }

    async fn get_user_location_data(&self, user_id: i64) -> Result<Vec<LocationData>> {
        let store = self.inner.read().await;
        let Some(owner) = store.owner(user_id) else {
            return Ok(Vec::new());
        };
        let mut records: Vec<LocationData> = store
            .location_data
            .iter()
            .filter(|l| owner.owns_watch(&l.watch_id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }
}

#[async_trait]
impl DocumentStore for MemoryBackend {
    async fn list_documents(&self) -> Result<Vec<Document>> {
        let store = self.inner.read().await;
        let mut docs: Vec<Document> = store.documents.iter().map(|d| d.meta.clone()).collect();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>> {
        let store = self.inner.read().await;
        Ok(store
            .documents
            .iter()
            .find(|d| d.meta.id == id)
            .map(|d| d.meta.clone()))
    }

    async fn get_document_content(&self, id: &str) -> Result<Option<(Document, Bytes)>> {
        let store = self.inner.read().await;
        Ok(store
            .documents
            .iter()
            .find(|d| d.meta.id == id)
            .map(|d| (d.meta.clone(), d.data.clone())))
    }

    async fn create_document(&self, input: NewDocument, data: Bytes) -> Result<Document> {
        if input.size != data.len() as u64 {
            return Err(CyncityError::Operation(format!(
                "Declared size {} does not match {} received bytes",
                input.size,
                data.len()
            )));
        }

        let mut store = self.inner.write().await;
        let meta = Document {
            id: format!("doc_{}", nanoid!()),
            name: input.name,
            doc_type: input.doc_type,
            size: input.size,
            created_at: Utc::now(),
            status: DocumentStatus::Uploaded,
            embedding_dim: None,
        };
        store.documents.insert(
            0,
            StoredDocument {
                meta: meta.clone(),
                data,
            },
        );
        tracing::info!(
            document_id = %meta.id,
            doc_type = %meta.doc_type,
            size = meta.size,
            "Document stored"
        );
        Ok(meta)
    }

    async fn mark_embedded(&self, id: &str, dimensions: u32) -> Result<Document> {
        let mut store = self.inner.write().await;
        let doc = store.document_mut(id)?;
        doc.meta.status = DocumentStatus::Embedded;
        doc.meta.embedding_dim = Some(dimensions);
        tracing::info!(document_id = %id, dimensions, "Document marked embedded");
        Ok(doc.meta.clone())
    }

    async fn delete_document(&self, id: &str) -> Result<()> {
        let mut store = self.inner.write().await;
        let before = store.documents.len();
        store.documents.retain(|d| d.meta.id != id);
        if store.documents.len() == before {
            return Err(CyncityError::NotFound("Document not found".to_string()));
        }
        tracing::info!(document_id = %id, "Document deleted");
        Ok(())
    }
}

#[async_trait]
impl ServiceStore for MemoryBackend {
    async fn list_services(&self, filter: &ServiceFilter) -> Result<Vec<ServicePoint>> {
        let store = self.inner.read().await;
        Ok(store
            .services
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DatabaseBackend for MemoryBackend {
    async fn initialize(&self) -> Result<()> {
        let mut store = self.inner.write().await;
        if store.seeded {
            tracing::debug!("Store already seeded, skipping");
            return Ok(());
        }

        store.load(SeedData::generate(Utc::now()));
        tracing::info!(
            users = store.users.len(),
            events = store.events.len(),
            user_data = store.user_data.len(),
            watches = store.watches.len(),
            health_records = store.health_data.len(),
            location_records = store.location_data.len(),
            "Seed data loaded"
        );
        Ok(())
    }

    async fn stats(&self) -> Result<StoreStats> {
        let store = self.inner.read().await;
        Ok(StoreStats {
            users: store.users.len(),
            active_users: store
                .users
                .iter()
                .filter(|u| u.status == UserStatus::Active)
                .count(),
            events: store.events.len(),
            datasets: store.documents.len(),
            embedded_datasets: store
                .documents
                .iter()
                .filter(|d| d.meta.status == DocumentStatus::Embedded)
                .count(),
            services: store.services.len(),
            user_data: store.user_data.len(),
            watches: store.watches.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed::{WATCH_1, WATCH_2, WATCH_3};
    use crate::models::{DocumentType, UserRole};
    use pretty_assertions::assert_eq;

    async fn seeded() -> MemoryBackend {
        let db = MemoryBackend::new();
        db.initialize().await.unwrap();
        db
    }

    fn ann() -> NewUser {
        NewUser {
            name: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            role: UserRole::Editor,
            status: UserStatus::Active,
        }
    }

    #[tokio::test]
    async fn create_user_assigns_fresh_id_and_timestamp() {
        let db = seeded().await;
        let started = Utc::now();

        let user = db.create_user(ann()).await.unwrap();
        assert!(user.id.starts_with("u_"));
        assert_eq!(user.id.len(), 2 + SHORT_ID_LEN);
        assert!(user.created_at >= started);

        let listed = db.list_users().await.unwrap();
        assert_eq!(listed.len(), 4);
        assert_eq!(listed[0].id, user.id);
        assert_eq!(listed.iter().filter(|u| u.id == user.id).count(), 1);
    }

    #[tokio::test]
    async fn update_unknown_user_leaves_store_unchanged() {
        let db = seeded().await;
        let before = db.list_users().await.unwrap();

        let err = db
            .update_user(
                "u_missing",
                UserPatch {
                    name: Some("Ghost".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CyncityError::NotFound(_)));
        assert_eq!(db.list_users().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let db = seeded().await;
        db.delete_user("u_2").await.unwrap();
        let err = db.delete_user("u_2").await.unwrap_err();
        assert!(matches!(err, CyncityError::NotFound(_)));

        db.delete_event("ev_1").await.unwrap();
        assert!(db.delete_event("ev_1").await.is_err());
    }

    #[tokio::test]
    async fn cascade_removes_watches_and_telemetry() {
        let db = seeded().await;
        let other_health = db.get_user_health_data(2).await.unwrap();

        let report = db.delete_user_data(1).await.unwrap();
        assert_eq!(
            report,
            CascadeReport {
                watches: 2,
                health_records: 14,
                location_records: 6,
            }
        );

        assert!(db.get_user_data(1).await.unwrap().is_none());
        assert!(db.get_user_watches(1).await.unwrap().is_empty());

        let store = db.inner.read().await;
        assert!(store.watches.iter().all(|w| w.user_id != 1));
        assert!(store
            .health_data
            .iter()
            .all(|h| h.watch_id != WATCH_1 && h.watch_id != WATCH_2));
        assert!(store
            .location_data
            .iter()
            .all(|l| l.watch_id != WATCH_1 && l.watch_id != WATCH_2));
        drop(store);

        assert_eq!(db.get_user_health_data(2).await.unwrap(), other_health);
    }

    #[tokio::test]
    async fn cascade_on_missing_record_is_not_found() {
        let db = seeded().await;
        let err = db.delete_user_data(99).await.unwrap_err();
        assert!(matches!(err, CyncityError::NotFound(_)));
        assert_eq!(db.stats().await.unwrap().watches, 3);
    }

    #[tokio::test]
    async fn user_without_watches_cascades_to_nothing() {
        let db = seeded().await;
        let report = db.delete_user_data(3).await.unwrap();
        assert_eq!(report, CascadeReport::default());
        assert_eq!(db.list_user_data().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn health_data_is_newest_first() {
        let db = seeded().await;
        let records = db.get_user_health_data(2).await.unwrap();
        assert_eq!(records.len(), 7);
        assert!(records.iter().all(|r| r.watch_id == WATCH_3));
        assert!(records
            .windows(2)
            .all(|pair| pair[0].timestamp >= pair[1].timestamp));
    }

    #[tokio::test]
    async fn unknown_user_has_no_telemetry() {
        let db = seeded().await;
        assert!(db.get_user_health_data(42).await.unwrap().is_empty());
        assert!(db.get_user_location_data(42).await.unwrap().is_empty());
        assert!(db.get_user_watches(42).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn attendees_are_deduplicated() {
        let db = seeded().await;
        db.add_attendee("ev_1", "new@example.com").await.unwrap();
        let event = db.add_attendee("ev_1", "NEW@example.com").await.unwrap();
        assert_eq!(event.attendees.len(), 3);

        let event = db.remove_attendee("ev_1", "new@example.com").await.unwrap();
        assert_eq!(event.attendees.len(), 2);

        let err = db
            .remove_attendee("ev_1", "new@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, CyncityError::NotFound(_)));
    }

    #[tokio::test]
    async fn initialize_twice_does_not_duplicate() {
        let db = seeded().await;
        db.initialize().await.unwrap();

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.users, 3);
        assert_eq!(stats.active_users, 2);
        assert_eq!(stats.events, 1);
        assert_eq!(stats.user_data, 3);
        assert_eq!(stats.watches, 3);
        assert_eq!(stats.services, 3);
    }

    #[tokio::test]
    async fn unseeded_store_starts_empty() {
        let db = MemoryBackend::new();
        assert_eq!(db.stats().await.unwrap(), StoreStats::default());
    }

    #[tokio::test]
    async fn documents_roundtrip_and_embed() {
        let db = MemoryBackend::new();
        let bytes = Bytes::from_static(b"%PDF-1.4 test");
        let doc = db
            .create_document(
                NewDocument {
                    name: "report.pdf".to_string(),
                    doc_type: DocumentType::Pdf,
                    size: bytes.len() as u64,
                },
                bytes.clone(),
            )
            .await
            .unwrap();
        assert_eq!(doc.status, DocumentStatus::Uploaded);

        let (meta, data) = db.get_document_content(&doc.id).await.unwrap().unwrap();
        assert_eq!(meta, doc);
        assert_eq!(data, bytes);

        let embedded = db.mark_embedded(&doc.id, 1536).await.unwrap();
        assert_eq!(embedded.status, DocumentStatus::Embedded);
        assert_eq!(embedded.embedding_dim, Some(1536));
        assert_eq!(db.stats().await.unwrap().embedded_datasets, 1);

        db.delete_document(&doc.id).await.unwrap();
        assert!(db.get_document(&doc.id).await.unwrap().is_none());
        assert!(db.mark_embedded(&doc.id, 8).await.is_err());
    }

    #[tokio::test]
    async fn document_size_must_match_payload() {
        let db = MemoryBackend::new();
        let err = db
            .create_document(
                NewDocument {
                    name: "a.txt".to_string(),
                    doc_type: DocumentType::PlainText,
                    size: 10,
                },
                Bytes::from_static(b"abc"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CyncityError::Operation(_)));
        assert!(db.list_documents().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn services_filter_by_category_and_query() {
        let db = seeded().await;
        let all = db.list_services(&ServiceFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let filter = ServiceFilter {
            category: None,
            query: Some("bloodwork".to_string()),
        };
        let hits = db.list_services(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Precise Diagnostics");
    }
}
