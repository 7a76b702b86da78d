//! Frontend services: context and hooks over the backend.

pub mod context;
pub mod hooks;

pub use context::{AppServices, AuthState, use_auth, use_auth_provider, use_services};
pub use hooks::{UseFetch, use_fetch_data};
