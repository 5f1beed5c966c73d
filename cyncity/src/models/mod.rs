mod document;
mod event;
mod service;
mod stats;
mod user;
mod user_data;

pub use document::*;
pub use event::*;
pub use service::*;
pub use stats::*;
pub use user::*;
pub use user_data::*;
