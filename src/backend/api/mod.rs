//! REST API access: one client, one error type, one list shape.

pub mod client;
pub mod error;
pub mod models;
pub mod resources;

pub use client::ApiClient;
pub use error::{ApiError, NETWORK_ERROR_MESSAGE};
pub use models::{ListPage, Record, Role, User};
pub use resources::{EmailDraft, PushDraft, ResourceKind};
