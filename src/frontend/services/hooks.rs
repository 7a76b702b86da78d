//! Data-fetching hook for components.

use super::context::use_services;
use crate::backend::services::fetcher::{FetchState, Fetcher};
use dioxus::prelude::*;
use serde::de::DeserializeOwned;
use std::rc::Rc;

/// Handle returned by [`use_fetch_data`].
pub struct UseFetch<T: 'static> {
    state: Signal<FetchState<T>>,
    fetcher: Rc<Fetcher<T>>,
}

impl<T: 'static> Clone for UseFetch<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            fetcher: Rc::clone(&self.fetcher),
        }
    }
}

impl<T> UseFetch<T>
where
    T: DeserializeOwned + Default + Clone + Send + Sync + 'static,
{
    pub fn state(&self) -> FetchState<T> {
        self.state.read().clone()
    }

    pub fn refetch(&self) {
        self.fetcher.refetch();
    }
}

/// Fetches `endpoint` with the session's bearer token on mount, when the
/// endpoint changes and when the token changes. In-flight requests are
/// aborted when the component unmounts.
pub fn use_fetch_data<T>(endpoint: &str) -> UseFetch<T>
where
    T: DeserializeOwned + Default + Clone + Send + Sync + 'static,
{
    let services = use_services();
    let fetcher = use_hook(|| Rc::new(Fetcher::<T>::mount(services.client.clone(), endpoint)));
    fetcher.set_endpoint(endpoint);

    let updates = use_hook(|| fetcher.subscribe());
    let mut state = use_signal(|| updates.borrow().clone());

    use_future(move || {
        let mut updates = updates.clone();
        async move {
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                state.set(next);
            }
        }
    });

    UseFetch { state, fetcher }
}
