//! Shared page building blocks.

pub mod resource_table;

pub use resource_table::ResourcePage;
