//! Access control components.

pub mod protected_route;

pub use protected_route::ProtectedRoute;
