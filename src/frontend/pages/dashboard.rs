//! Landing page with a count per resource.

use crate::backend::api::{ApiError, ResourceKind};
use crate::backend::services::guard::{self, GuardOutcome};
use crate::backend::utils::route::Route;
use crate::backend::utils::runtime;
use crate::frontend::services::context::{use_auth, use_services};
use dioxus::prelude::*;
use dioxus_router::navigator;
use futures_util::future::join_all;

/// Count shown on one dashboard card.
#[derive(Debug, Clone, PartialEq)]
struct Stat {
    kind: ResourceKind,
    count: Result<usize, String>,
}

fn route_for(kind: ResourceKind) -> Route {
    match kind {
        ResourceKind::Admins => Route::Admins {},
        ResourceKind::Customers => Route::Customers {},
        ResourceKind::Events => Route::Events {},
        ResourceKind::Adverts => Route::Adverts {},
        ResourceKind::Promos => Route::Promos {},
        ResourceKind::SubscriptionPlans => Route::SubscriptionPlans {},
        ResourceKind::EmailNotifications => Route::EmailNotifications {},
        ResourceKind::PushNotifications => Route::PushNotifications {},
    }
}

#[component]
pub fn Dashboard() -> Element {
    let services = use_services();
    let auth = use_auth();
    let nav = navigator();

    // Only count what this admin may open.
    let kinds: Vec<ResourceKind> = ResourceKind::ALL
        .into_iter()
        .filter(|kind| {
            guard::evaluate(&auth.session.read(), kind.allowed_roles()) == GuardOutcome::Authorized
        })
        .collect();

    let stats = use_resource(move || {
        let client = services.client.clone();
        let kinds = kinds.clone();
        async move {
            runtime::run(async move {
                let counts = join_all(kinds.iter().map(|kind| client.list(*kind))).await;
                kinds
                    .into_iter()
                    .zip(counts)
                    .map(|(kind, count)| Stat {
                        kind,
                        count: count.map(|page| page.total).map_err(|e: ApiError| e.to_string()),
                    })
                    .collect::<Vec<_>>()
            })
            .await
            .map_err(|e| e.to_string())
        }
    });

    let name = auth.display_name();

    rsx! {
        h2 { "Welcome back, {name}" }

        match &*stats.read_unchecked() {
            None => rsx! { div { class: "status-message", "Loading..." } },
            Some(Err(message)) => rsx! { div { class: "error-message", "{message}" } },
            Some(Ok(stats)) => rsx! {
                div { class: "stat-grid",
                    for stat in stats.iter().cloned() {
                        div {
                            key: "{stat.kind.label()}",
                            class: "stat-card",
                            onclick: move |_| {
                                nav.push(route_for(stat.kind));
                            },
                            div { class: "status-message", "{stat.kind.label()}" }
                            match stat.count {
                                Ok(count) => rsx! { div { class: "stat-value", "{count}" } },
                                Err(message) => rsx! { div { class: "error-message", "{message}" } },
                            }
                        }
                    }
                }
            },
        }
    }
}
