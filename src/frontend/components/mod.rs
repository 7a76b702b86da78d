//! UI components and layouts shared between pages.

pub mod auth;
pub mod common;
pub mod layout;
