//! Utility modules for the dashboard backend.
//!
//! Configuration, per-user paths, the shared runtime and the route table.

/// Application configuration.
pub mod config;
/// Embedded stylesheets.
pub mod css;
/// Path utilities for the per-user application directory.
pub mod paths;
/// Application routing system.
pub mod route;
/// Process-wide tokio runtime.
pub mod runtime;
