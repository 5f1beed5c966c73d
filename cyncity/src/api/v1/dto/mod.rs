//! Request and response bodies of the v1 API.
//!
//! Request payloads keep every field optional and untyped so that presence,
//! format, and enum membership are all reported through the same ordered
//! validation path. `TryFrom` conversions turn a validated request into the
//! store input types in `crate::models`.

pub mod common;
pub mod documents;
pub mod events;
pub mod services;
pub mod users;

pub use common::*;
pub use documents::*;
pub use events::*;
pub use services::*;
pub use users::*;
