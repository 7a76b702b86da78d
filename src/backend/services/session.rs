//! Session store: the single source of truth for who is signed in.
//!
//! State lives behind a `watch` channel so the UI and fetchers can react to
//! changes. The bearer token and user id are mirrored to durable storage on
//! every transition; the user profile itself is not persisted and is
//! re-derived from the API after a restart (see `auth::rehydrate`).

use crate::backend::api::models::{Role, User};
use crate::backend::services::storage::{DurableStorage, TOKEN_KEY, USER_ID_KEY};
use std::sync::Arc;
use tokio::sync::watch;

/// Whether the store already knows the startup session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Durable storage not read yet, or a restored token still awaits its
    /// user profile.
    #[default]
    Restoring,
    Ready,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub phase: SessionPhase,
}

impl Session {
    /// A token without a user is not trusted.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn role(&self) -> Option<&Role> {
        self.user.as_ref().map(|u| &u.role)
    }

    pub fn is_restoring(&self) -> bool {
        self.phase == SessionPhase::Restoring
    }
}

/// Everything a successful login hands to the store.
#[derive(Debug, Clone)]
pub struct LoginPayload {
    pub token: String,
    pub user_id: String,
    pub user: User,
}

impl LoginPayload {
    pub fn new(token: String, user: User) -> Self {
        Self {
            token,
            user_id: user.id.clone(),
            user,
        }
    }
}

struct Inner {
    storage: Arc<dyn DurableStorage>,
    state: watch::Sender<Session>,
}

/// Cheap to clone; all clones share one session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn DurableStorage>) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            inner: Arc::new(Inner { storage, state }),
        }
    }

    /// Seeds the session from durable storage. Without a stored token the
    /// session is unauthenticated and ready; with one it stays restoring
    /// until [`finish_restore`](Self::finish_restore).
    pub fn restore(&self) -> Session {
        let token = self.read_key(TOKEN_KEY);
        let user_id = self.read_key(USER_ID_KEY);
        log::debug!("Restored session keys (token present: {})", token.is_some());

        self.transition(false, |session| {
            session.phase = if token.is_some() {
                SessionPhase::Restoring
            } else {
                SessionPhase::Ready
            };
            session.user = None;
            session.token = token;
            session.user_id = user_id;
        })
    }

    /// Completes a restore with the re-derived profile, if one was found.
    pub fn finish_restore(&self, user: Option<User>) -> Session {
        self.transition(true, |session| {
            session.user = user;
            session.phase = SessionPhase::Ready;
        })
    }

    /// Sets user, token and user id in one step.
    pub fn handle_login(&self, payload: LoginPayload) -> Session {
        log::info!("Admin {} signed in", payload.user_id);
        self.transition(true, |session| {
            session.user = Some(payload.user);
            session.token = Some(payload.token);
            session.user_id = Some(payload.user_id);
            session.phase = SessionPhase::Ready;
        })
    }

    /// Clears the session and its durable copy. Safe to call repeatedly.
    pub fn logout(&self) -> Session {
        if self.inner.state.borrow().token.is_some() {
            log::info!("Signing out");
        }
        self.transition(true, |session| {
            session.user = None;
            session.token = None;
            session.user_id = None;
            session.phase = SessionPhase::Ready;
        })
    }

    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    fn transition(&self, persist: bool, apply: impl FnOnce(&mut Session)) -> Session {
        let mut before = (None, None);
        let mut after = Session::default();
        self.inner.state.send_modify(|session| {
            before = (session.token.clone(), session.user_id.clone());
            apply(session);
            after = session.clone();
        });

        if persist {
            self.mirror(TOKEN_KEY, before.0.as_deref(), after.token.as_deref());
            self.mirror(USER_ID_KEY, before.1.as_deref(), after.user_id.as_deref());
        }
        after
    }

    /// Durable writes are best effort: a failure is logged and the in-memory
    /// session stays as it is.
    fn mirror(&self, key: &str, before: Option<&str>, after: Option<&str>) {
        let storage = &self.inner.storage;
        let result = match after {
            Some(value) if before != Some(value) => storage.set(key, value),
            Some(_) => return,
            None => storage.remove(key),
        };
        if let Err(e) = result {
            log::error!("Failed to persist session key '{key}': {e}");
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.inner.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                log::error!("Failed to read session key '{key}': {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::services::storage::MemoryStorage;
    use serde_json::json;

    fn admin(id: &str, role: &str) -> User {
        serde_json::from_value(json!({
            "_id": id,
            "firstName": "Test",
            "lastName": "Admin",
            "role": role,
            "emailAddress": "admin@splinx.test"
        }))
        .expect("valid user")
    }

    fn store() -> (SessionStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (SessionStore::new(storage.clone()), storage)
    }

    #[test]
    fn login_persists_and_restores() {
        let (store, storage) = store();
        store.restore();
        store.handle_login(LoginPayload {
            token: "abc".to_string(),
            user_id: "u1".to_string(),
            user: admin("u1", "admin"),
        });

        assert_eq!(storage.get(TOKEN_KEY).expect("get"), Some("abc".to_string()));
        assert_eq!(storage.get(USER_ID_KEY).expect("get"), Some("u1".to_string()));

        let reloaded = SessionStore::new(storage);
        let session = reloaded.restore();
        assert_eq!(session.token.as_deref(), Some("abc"));
        assert_eq!(session.user_id.as_deref(), Some("u1"));
        assert_eq!(session.user, None);
        assert!(session.is_restoring());
    }

    #[test]
    fn logout_clears_storage_idempotently() {
        let (store, storage) = store();
        store.handle_login(LoginPayload::new("abc".to_string(), admin("u1", "admin")));

        let session = store.logout();
        assert_eq!(session, Session { phase: SessionPhase::Ready, ..Session::default() });
        assert_eq!(storage.get(TOKEN_KEY).expect("get"), None);
        assert_eq!(storage.get(USER_ID_KEY).expect("get"), None);

        store.logout();
        assert_eq!(storage.get(TOKEN_KEY).expect("get"), None);
    }

    #[test]
    fn empty_storage_restores_ready_and_signed_out() {
        let (store, _) = store();
        assert!(store.snapshot().is_restoring());

        let session = store.restore();
        assert_eq!(session.phase, SessionPhase::Ready);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn finish_restore_sets_user_and_ready() {
        let (store, storage) = store();
        storage.set(TOKEN_KEY, "abc").expect("seed");
        storage.set(USER_ID_KEY, "u1").expect("seed");
        store.restore();

        let session = store.finish_restore(Some(admin("u1", "superadmin")));
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(&Role::SuperAdmin));
        assert_eq!(storage.get(TOKEN_KEY).expect("get"), Some("abc".to_string()));
    }

    #[test]
    fn subscribers_see_login_in_one_change() {
        let (store, _) = store();
        let mut rx = store.subscribe();
        rx.mark_unchanged();

        store.handle_login(LoginPayload::new("abc".to_string(), admin("u1", "admin")));

        assert!(rx.has_changed().expect("sender alive"));
        let seen = rx.borrow_and_update().clone();
        assert!(seen.is_authenticated());
        assert_eq!(seen.user_id.as_deref(), Some("u1"));
    }
}
