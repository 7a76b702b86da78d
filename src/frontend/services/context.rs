//! Authentication context and state management.

use crate::backend::api::{ApiClient, User};
use crate::backend::services::auth;
use crate::backend::services::session::{Session, SessionStore};
use crate::backend::utils::runtime;
use dioxus::prelude::*;

/// Long-lived services handed to the UI at launch.
#[derive(Clone)]
pub struct AppServices {
    pub store: SessionStore,
    pub client: ApiClient,
}

/// Reactive mirror of the session store.
#[derive(Clone, Copy)]
pub struct AuthState {
    pub session: Signal<Session>,
}

impl AuthState {
    pub fn current_user(&self) -> Option<User> {
        self.session.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    /// Gets the signed-in admin's name, or an empty string.
    pub fn display_name(&self) -> String {
        self.session
            .read()
            .user
            .as_ref()
            .map(User::display_name)
            .unwrap_or_default()
    }
}

/// Provides [`AuthState`] to the tree, keeps it in sync with the store and
/// finishes restoring a persisted session.
pub fn use_auth_provider() -> AuthState {
    let services = use_context::<AppServices>();
    let mut session = use_signal(|| services.store.snapshot());

    let store = services.store.clone();
    use_future(move || {
        let mut updates = store.subscribe();
        async move {
            loop {
                let next = updates.borrow_and_update().clone();
                session.set(next);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    use_hook(move || {
        let AppServices { store, client } = services;
        spawn(async move {
            if let Err(e) = runtime::run(async move { auth::rehydrate(&store, &client).await }).await {
                log::error!("Session restore did not complete: {e}");
            }
        });
    });

    use_context_provider(|| AuthState { session })
}

pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}
