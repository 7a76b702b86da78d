//! Authenticated "fetch this endpoint with my session" primitive.
//!
//! A [`Fetcher`] owns the state of one GET endpoint: data, loading flag and
//! last error. Requests run on the tokio runtime and report back through a
//! `watch` channel. Overlapping requests are not sequenced; whichever
//! resolves last wins. Switching endpoints aborts the old endpoint's
//! requests and discards any of their answers that still arrive. Dropping
//! the fetcher aborts whatever is in flight, and completions that race the
//! drop find nothing to write to.

use crate::backend::api::ApiClient;
use crate::backend::utils::runtime;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinSet};

#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: T,
    pub is_loading: bool,
    pub error: Option<String>,
    in_flight: usize,
}

impl<T: Default> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: T::default(),
            is_loading: false,
            error: None,
            in_flight: 0,
        }
    }
}

struct Shared<T> {
    client: ApiClient,
    endpoint: Mutex<String>,
    state: watch::Sender<FetchState<T>>,
    requests: AtomicUsize,
    /// Bumped on every endpoint switch; requests from older generations
    /// never write state.
    generation: AtomicU64,
    tasks: Mutex<JoinSet<()>>,
    runtime: Handle,
}

pub struct Fetcher<T> {
    shared: Arc<Shared<T>>,
    session_watch: Option<AbortHandle>,
}

impl<T> Fetcher<T>
where
    T: DeserializeOwned + Default + Clone + Send + Sync + 'static,
{
    /// Creates an idle fetcher. Nothing is requested until
    /// [`refetch`](Self::refetch).
    pub fn new(client: ApiClient, endpoint: impl Into<String>) -> Self {
        let (state, _) = watch::channel(FetchState::default());
        Self {
            shared: Arc::new(Shared {
                client,
                endpoint: Mutex::new(endpoint.into()),
                state,
                requests: AtomicUsize::new(0),
                generation: AtomicU64::new(0),
                tasks: Mutex::new(JoinSet::new()),
                runtime: runtime::handle(),
            }),
            session_watch: None,
        }
    }

    /// Creates a fetcher that requests now and again whenever the session
    /// token changes.
    pub fn mount(client: ApiClient, endpoint: impl Into<String>) -> Self {
        let mut fetcher = Self::new(client, endpoint);
        fetcher.watch_session();
        fetcher.refetch();
        fetcher
    }

    pub fn refetch(&self) {
        Self::spawn_request(&self.shared);
    }

    /// Points the fetcher at another endpoint, requesting it if it changed.
    /// Requests still running for the old endpoint are aborted.
    pub fn set_endpoint(&self, endpoint: &str) {
        let changed = match self.shared.endpoint.lock() {
            Ok(mut current) if *current != endpoint => {
                *current = endpoint.to_string();
                true
            }
            Ok(_) => false,
            Err(_) => {
                log::error!("Fetcher endpoint lock poisoned");
                false
            }
        };
        if changed {
            self.retire_requests();
            self.refetch();
        }
    }

    fn retire_requests(&self) {
        let shared = &self.shared;
        shared.state.send_modify(|state| {
            shared.generation.fetch_add(1, Ordering::SeqCst);
            state.in_flight = 0;
            state.is_loading = false;
        });
        match shared.tasks.lock() {
            Ok(mut tasks) => tasks.abort_all(),
            Err(_) => log::error!("Fetcher task lock poisoned"),
        }
    }

    pub fn endpoint(&self) -> String {
        self.shared
            .endpoint
            .lock()
            .map(|e| e.clone())
            .unwrap_or_default()
    }

    pub fn state(&self) -> FetchState<T> {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.shared.state.subscribe()
    }

    /// Number of requests issued since creation.
    pub fn requests_issued(&self) -> usize {
        self.shared.requests.load(Ordering::SeqCst)
    }

    fn watch_session(&mut self) {
        let mut session = self.shared.client.session().subscribe();
        let mut last_token = session.borrow_and_update().token.clone();
        let weak = Arc::downgrade(&self.shared);

        let handle = self.shared.runtime.spawn(async move {
            while session.changed().await.is_ok() {
                let token = session.borrow_and_update().token.clone();
                if token == last_token {
                    continue;
                }
                last_token = token;
                let Some(shared) = weak.upgrade() else { break };
                Self::spawn_request(&shared);
            }
        });
        self.session_watch = Some(handle.abort_handle());
    }

    fn spawn_request(shared: &Arc<Shared<T>>) {
        // Endpoint and generation are read under the state lock so a request
        // is never tagged with a generation newer than its endpoint.
        let mut target = None;
        shared.state.send_if_modified(|state| {
            let Ok(endpoint) = shared.endpoint.lock() else {
                return false;
            };
            target = Some((endpoint.clone(), shared.generation.load(Ordering::SeqCst)));
            state.in_flight += 1;
            state.is_loading = true;
            true
        });
        let Some((endpoint, generation)) = target else {
            log::error!("Fetcher endpoint lock poisoned");
            return;
        };
        shared.requests.fetch_add(1, Ordering::SeqCst);

        let client = shared.client.clone();
        let weak = Arc::downgrade(shared);
        let request = async move {
            let result = client.get_json::<T>(&endpoint).await;
            Self::complete(&weak, generation, &endpoint, result);
        };

        match shared.tasks.lock() {
            Ok(mut tasks) => {
                while tasks.try_join_next().is_some() {}
                tasks.spawn_on(request, &shared.runtime);
            }
            Err(_) => log::error!("Fetcher task lock poisoned"),
        }
    }

    fn complete(
        weak: &Weak<Shared<T>>,
        generation: u64,
        endpoint: &str,
        result: Result<T, crate::backend::api::ApiError>,
    ) {
        let Some(shared) = weak.upgrade() else {
            log::debug!("Dropping late response for {endpoint}");
            return;
        };
        shared.state.send_if_modified(|state| {
            if shared.generation.load(Ordering::SeqCst) != generation {
                log::debug!("Discarding response for previous endpoint {endpoint}");
                return false;
            }
            state.in_flight = state.in_flight.saturating_sub(1);
            state.is_loading = state.in_flight > 0;
            match result {
                Ok(data) => {
                    state.data = data;
                    state.error = None;
                }
                Err(e) => {
                    log::error!("Error fetching {endpoint}: {e}");
                    state.error = Some(e.to_string());
                }
            }
            true
        });
    }
}

impl<T> Drop for Fetcher<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.session_watch.take() {
            handle.abort();
        }
        if let Ok(mut tasks) = self.shared.tasks.lock() {
            tasks.abort_all();
        }
    }
}
