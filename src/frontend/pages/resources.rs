//! One list screen per managed resource.

use crate::backend::api::ResourceKind;
use crate::frontend::components::auth::ProtectedRoute;
use crate::frontend::components::common::ResourcePage;
use dioxus::prelude::*;

#[component]
pub fn Admins() -> Element {
    rsx! {
        ProtectedRoute { allowed_roles: ResourceKind::Admins.allowed_roles(),
            ResourcePage { kind: ResourceKind::Admins }
        }
    }
}

#[component]
pub fn Customers() -> Element {
    rsx! { ResourcePage { kind: ResourceKind::Customers } }
}

#[component]
pub fn Events() -> Element {
    rsx! { ResourcePage { kind: ResourceKind::Events } }
}

#[component]
pub fn Adverts() -> Element {
    rsx! { ResourcePage { kind: ResourceKind::Adverts } }
}

#[component]
pub fn Promos() -> Element {
    rsx! { ResourcePage { kind: ResourceKind::Promos } }
}

#[component]
pub fn SubscriptionPlans() -> Element {
    rsx! { ResourcePage { kind: ResourceKind::SubscriptionPlans } }
}

#[component]
pub fn EmailNotifications() -> Element {
    rsx! { ResourcePage { kind: ResourceKind::EmailNotifications } }
}

#[component]
pub fn PushNotifications() -> Element {
    rsx! { ResourcePage { kind: ResourceKind::PushNotifications } }
}
