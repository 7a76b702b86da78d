//! Splinx Planet admin dashboard.
//!
//! `backend` holds the session store, API client, data fetcher, route guard
//! and login flow; `frontend` renders them with Dioxus.

pub mod backend;
pub mod frontend;
pub mod utils;
