//! Login flow and startup rehydration.

use crate::backend::api::{ApiClient, ApiError, ResourceKind, User};
use crate::backend::services::session::{LoginPayload, Session, SessionStore};
use thiserror::Error;

/// Shown when the server rejects a login without saying why.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please check your credentials and try again.";

#[derive(Debug, Error)]
pub enum AuthError {
    /// The server answered but did not grant a session.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Email and password as typed on the login screen. No format checks are
/// made client-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email_address: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email_address: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email_address: email_address.into(),
            password: password.into(),
        }
    }
}

/// Signs in. The session store is only touched on success, and then in a
/// single transition.
pub async fn login(
    store: &SessionStore,
    client: &ApiClient,
    credentials: &Credentials,
) -> Result<Session, AuthError> {
    let response = client
        .login_admin(&credentials.email_address, &credentials.password)
        .await
        .map_err(|e| {
            log::error!("Login request failed: {e}");
            e
        })?;

    match (response.success, response.token, response.admin) {
        (true, Some(token), Some(admin)) if !token.is_empty() => {
            Ok(store.handle_login(LoginPayload::new(token, admin)))
        }
        (success, _, _) => {
            let message = response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| LOGIN_FALLBACK_MESSAGE.to_string());
            log::warn!("Login rejected (success: {success}): {message}");
            Err(AuthError::Rejected(message))
        }
    }
}

/// Re-derives the user profile for a session restored from storage.
///
/// A 401 ends the session. Other failures leave the user unset, which the
/// route guard treats as signed out.
pub async fn rehydrate(store: &SessionStore, client: &ApiClient) -> Session {
    let session = store.snapshot();
    if !session.is_restoring() {
        return session;
    }
    let Some(user_id) = session.user_id.clone().filter(|_| session.token.is_some()) else {
        return store.finish_restore(None);
    };

    match client.list(ResourceKind::Admins).await {
        Ok(page) => {
            let user = page
                .items
                .into_iter()
                .filter(|record| record.id.as_deref() == Some(user_id.as_str()))
                .find_map(|record| {
                    serde_json::from_value::<User>(serde_json::Value::Object(record.fields))
                        .map_err(|e| log::warn!("Stored admin {user_id} has an unreadable profile: {e}"))
                        .ok()
                });
            if user.is_none() {
                log::warn!("Admin {user_id} not found while restoring session");
            }
            store.finish_restore(user)
        }
        Err(e) if e.is_unauthorized() => {
            log::info!("Stored token was rejected, signing out");
            store.finish_restore(None);
            store.logout()
        }
        Err(e) => {
            log::error!("Failed to restore session profile: {e}");
            store.finish_restore(None)
        }
    }
}
