pub mod documents;
pub mod events;
pub(crate) mod health;
pub mod services;
pub mod user_data;
pub mod users;

pub use health::{health_check, store_stats};
