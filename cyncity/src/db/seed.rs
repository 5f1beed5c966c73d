//! Sample records loaded when the store is initialized.
//!
//! Telemetry values are derived from the record index so every process starts
//! from the same data set (timestamps aside).

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::models::{
    CaregiverDetail, Event, HealthData, LocationData, ServiceCategory, ServicePoint, User,
    UserData, UserRole, UserStatus, WatchData,
};

pub const WATCH_1: Uuid = Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440001);
pub const WATCH_2: Uuid = Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440002);
pub const WATCH_3: Uuid = Uuid::from_u128(0x550e8400_e29b_41d4_a716_446655440003);

const HEALTH_DAYS: i64 = 7;
const LOCATION_DAYS: i64 = 3;

pub struct SeedData {
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub user_data: Vec<UserData>,
    pub watches: Vec<WatchData>,
    pub health_data: Vec<HealthData>,
    pub location_data: Vec<LocationData>,
    pub services: Vec<ServicePoint>,
}

impl SeedData {
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self {
            users: users(now),
            events: events(now),
            user_data: user_data(now),
            watches: watches(),
            health_data: health_data(now),
            location_data: location_data(now),
            services: services(),
        }
    }
}

/// Deterministic value in `min..min + span`.
fn sample(index: u64, salt: u64, min: u32, span: u32) -> u32 {
    let mut x = index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ salt;
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
    x ^= x >> 33;
    min + (x % u64::from(span.max(1))) as u32
}

fn user(
    id: &str,
    name: &str,
    email: &str,
    role: UserRole,
    status: UserStatus,
    at: DateTime<Utc>,
) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        status,
        created_at: at,
    }
}

fn users(now: DateTime<Utc>) -> Vec<User> {
    vec![
        user("u_1", "Jane Doe", "jane@gmail.com", UserRole::Admin, UserStatus::Active, now),
        user(
            "u_2",
            "John Smith",
            "john@gmail.com",
            UserRole::Editor,
            UserStatus::Active,
            now - Duration::minutes(1),
        ),
        user(
            "u_3",
            "Alex Kim",
            "alex@gmail.com",
            UserRole::Viewer,
            UserStatus::Suspended,
            now - Duration::minutes(2),
        ),
    ]
}

fn events(now: DateTime<Utc>) -> Vec<Event> {
    vec![Event {
        id: "ev_1".to_string(),
        title: "Community Health Fair".to_string(),
        venue: "Civic Center".to_string(),
        date: now.format("%Y-%m-%d").to_string(),
        time: "10:00".to_string(),
        organizer: "City Health".to_string(),
        agenda: "Free screenings, vaccinations, and wellness talks.".to_string(),
        attendees: vec!["guest1@gmail.com".to_string(), "guest2@gmail.com".to_string()],
    }]
}

fn user_data(now: DateTime<Utc>) -> Vec<UserData> {
    vec![
        UserData {
            id: 1,
            parent_name: Some("Ayesha Khan".to_string()),
            email: "ayesha.khan@gmail.com".to_string(),
            password: None,
            is_verified: true,
            verification_token: None,
            phone_number: Some("+92-300-1234567".to_string()),
            reset_password_token: None,
            reset_password_expiry: None,
            refresh_token: None,
            watch_ids: vec![WATCH_1, WATCH_2],
            created_at: now - Duration::days(30),
        },
        UserData {
            id: 2,
            parent_name: Some("Bilal Ahmed".to_string()),
            email: "bilal.ahmed@gmail.com".to_string(),
            password: None,
            is_verified: false,
            verification_token: Some("verify_token_123".to_string()),
            phone_number: Some("+92-301-2345678".to_string()),
            reset_password_token: None,
            reset_password_expiry: None,
            refresh_token: None,
            watch_ids: vec![WATCH_3],
            created_at: now - Duration::days(15),
        },
        UserData {
            id: 3,
            parent_name: None,
            email: "rehan@gmail.com".to_string(),
            password: None,
            is_verified: false,
            verification_token: None,
            phone_number: None,
            reset_password_token: None,
            reset_password_expiry: None,
            refresh_token: None,
            watch_ids: vec![],
            created_at: now - Duration::days(7),
        },
    ]
}

fn caregiver(name: &str, relation: &str, phone_number: &str) -> CaregiverDetail {
    CaregiverDetail {
        name: name.to_string(),
        relation: relation.to_string(),
        phone_number: phone_number.to_string(),
    }
}

fn watches() -> Vec<WatchData> {
    let watch = |id: i64,
                 watch_id: Uuid,
                 name: &str,
                 brand: &str,
                 username: &str,
                 phone: &str,
                 caregivers: Vec<CaregiverDetail>,
                 user_id: i64| {
        let phone_numbers = caregivers
            .iter()
            .map(|c| c.phone_number.as_str())
            .collect::<Vec<_>>()
            .join(",");
        WatchData {
            id,
            watch_id,
            name: name.to_string(),
            brand: brand.to_string(),
            username: username.to_string(),
            password: Some("encrypted_password".to_string()),
            phone_number: Some(phone.to_string()),
            caregiver_details: caregivers,
            caregiver_phone_numbers: Some(phone_numbers),
            refresh_token: None,
            user_id,
        }
    };

    vec![
        watch(
            1,
            WATCH_1,
            "Zara's Watch",
            "Apple Watch",
            "zara_watch",
            "+92-302-3456789",
            vec![
                caregiver("Ayesha Khan", "Mother", "+92-300-1234567"),
                caregiver("Imran Khan", "Father", "+92-300-9876543"),
            ],
            1,
        ),
        watch(
            2,
            WATCH_2,
            "Ali's Watch",
            "Samsung Galaxy Watch",
            "ali_watch",
            "+92-303-4567890",
            vec![caregiver("Ayesha Khan", "Mother", "+92-300-1234567")],
            1,
        ),
        watch(
            3,
            WATCH_3,
            "Hassan's Watch",
            "Fitbit Versa",
            "hassan_watch",
            "+92-304-5678901",
            vec![
                caregiver("Bilal Ahmed", "Father", "+92-301-2345678"),
                caregiver("Fatima Ahmed", "Mother", "+92-301-8765432"),
            ],
            2,
        ),
    ]
}

fn health_data(now: DateTime<Utc>) -> Vec<HealthData> {
    let mut records = Vec::new();
    for day in 0..HEALTH_DAYS {
        let timestamp = now - Duration::days(day);
        for watch_id in [WATCH_1, WATCH_2, WATCH_3] {
            let n = records.len() as u64;
            records.push(HealthData {
                id: n as i64 + 1,
                watch_id,
                step_count: Some(sample(n, 1, 2000, 10_000)),
                heart_rate: Some(sample(n, 2, 60, 40)),
                active_calories: Some(sample(n, 3, 200, 500)),
                blood_oxygen: Some(sample(n, 4, 95, 5)),
                sleep_hours: Some(f64::from(sample(n, 5, 6, 4))),
                distance: Some(f64::from(sample(n, 6, 2, 10))),
                resting_heart_rate: Some(sample(n, 7, 50, 20)),
                floors_climbed: Some(sample(n, 8, 5, 20)),
                timestamp,
            });
        }
    }
    records
}

fn location_data(now: DateTime<Utc>) -> Vec<LocationData> {
    let anchors = [
        (WATCH_1, 40.7128, -74.006, "New York, NY"),
        (WATCH_2, 34.0522, -118.2437, "Los Angeles, CA"),
        (WATCH_3, 41.8781, -87.6298, "Chicago, IL"),
    ];
    let jitter = |n: u64, salt: u64| (f64::from(sample(n, salt, 0, 1000)) / 1000.0 - 0.5) * 0.01;

    let mut records = Vec::new();
    for day in 0..LOCATION_DAYS {
        let timestamp = now - Duration::days(day);
        for (watch_id, lat, lng, label) in anchors {
            let n = records.len() as u64;
            records.push(LocationData {
                id: n as i64 + 1,
                watch_id,
                latitude: lat + jitter(n, 11),
                longitude: lng + jitter(n, 12),
                location: Some(label.to_string()),
                timestamp,
            });
        }
    }
    records
}

fn services() -> Vec<ServicePoint> {
    let point = |id: &str, name: &str, category, location: &str, contact: &str, tags: &[&str]| {
        ServicePoint {
            id: id.to_string(),
            name: name.to_string(),
            category,
            location: location.to_string(),
            contact: contact.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    };

    vec![
        point(
            "1",
            "Main St. POS",
            ServiceCategory::PointsOfSale,
            "123 Main St, Springfield",
            "+1 (555) 0123",
            &["pos", "retail"],
        ),
        point(
            "2",
            "Green Pharmacy",
            ServiceCategory::DrugStores,
            "42 Elm St, Springfield",
            "+1 (555) 4567",
            &["rx", "otc"],
        ),
        point(
            "3",
            "Precise Diagnostics",
            ServiceCategory::DiagnosticCenters,
            "9 Oak Ave, Springfield",
            "+1 (555) 9876",
            &["lab", "bloodwork"],
        ),
    ]
}
