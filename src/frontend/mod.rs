//! Frontend module for the Splinx Planet admin dashboard.

pub mod components;
pub mod pages;
pub mod services;
