//! Typed HTTP client shared by every screen.
//!
//! All requests go through [`ApiClient::send`], which attaches the bearer
//! token from the session store, checks the status and turns failure bodies
//! into [`ApiError`]s.

use super::error::ApiError;
use super::models::{LoginRequest, LoginResponse};
use crate::backend::services::session::SessionStore;
use crate::backend::utils::config::{ApiConfig, UnauthorizedPolicy};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const LOGIN_ENDPOINT: &str = "/admin/admin-login";

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
    on_unauthorized: UnauthorizedPolicy,
}

impl ApiClient {
    pub fn new(
        config: &ApiConfig,
        session: SessionStore,
        on_unauthorized: UnauthorizedPolicy,
    ) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Config("API base URL is empty".to_string()));
        }

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            session,
            on_unauthorized,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Joins a relative endpoint onto the base URL.
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.base_url)
        } else {
            format!("{}/{endpoint}", self.base_url)
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let value = self.send(Method::GET, endpoint, None).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let value = self.send(Method::POST, endpoint, Some(&body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn put_json<B, T>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let value = self.send(Method::PUT, endpoint, Some(&body)).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.send(Method::DELETE, endpoint, None).await
    }

    /// Issues one request. Empty success bodies come back as `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        log::debug!("{method} {url}");

        let mut request = self.http.request(method.clone(), &url).header(ACCEPT, "application/json");
        if let Some(token) = self.session.token() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(|e| {
            log::error!("{method} {url} failed: {e}");
            ApiError::from(e)
        })?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let err = ApiError::from_status(status, &bytes);
            log::warn!("{method} {url} returned {status}: {err}");
            if err.is_unauthorized() {
                self.handle_unauthorized();
            }
            return Err(err);
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Calls the login endpoint. The body is read whatever the status, since
    /// rejected logins still answer `{ success: false, message }`.
    pub async fn login_admin(&self, email_address: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = self.url(LOGIN_ENDPOINT);
        log::debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&LoginRequest {
                email_address,
                password,
            })
            .send()
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<LoginResponse>(&bytes) {
            Ok(login) => Ok(login),
            Err(_) if !status.is_success() => Err(ApiError::from_status(status, &bytes)),
            Err(e) => Err(e.into()),
        }
    }

    fn handle_unauthorized(&self) {
        match self.on_unauthorized {
            UnauthorizedPolicy::Ignore => {}
            UnauthorizedPolicy::EndSession => {
                log::warn!("Ending session after 401 response");
                self.session.logout();
            }
        }
    }
}
