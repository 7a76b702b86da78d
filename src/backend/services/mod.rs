//! Core services.

pub mod auth;
pub mod fetcher;
pub mod guard;
pub mod session;
pub mod storage;

pub use auth::{AuthError, Credentials};
pub use fetcher::{FetchState, Fetcher};
pub use guard::GuardOutcome;
pub use session::{LoginPayload, Session, SessionPhase, SessionStore};
pub use storage::{DurableStorage, FileStorage, MemoryStorage};
