//! Layout components.

pub mod main;
pub mod navigation;

pub use main::Shell;
pub use navigation::Navigation;
