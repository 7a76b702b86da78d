use crate::backend::api::ResourceKind;
use crate::backend::services::guard::{self, GuardOutcome};
use crate::backend::utils::route::Route;
use crate::frontend::services::context::use_auth;
use dioxus::prelude::*;
use dioxus_router::{navigator, use_route};

const ITEMS: [Route; 10] = [
    Route::Dashboard {},
    Route::Admins {},
    Route::Customers {},
    Route::Events {},
    Route::Adverts {},
    Route::Promos {},
    Route::SubscriptionPlans {},
    Route::EmailNotifications {},
    Route::PushNotifications {},
    Route::SendNotification {},
];

#[component]
pub fn Navigation() -> Element {
    let nav = navigator();
    let route = use_route::<Route>();
    let auth = use_auth();

    // Admin management is only listed for roles that may open it.
    let admins_rule = ResourceKind::Admins.allowed_roles();
    let show_admins =
        guard::evaluate(&auth.session.read(), admins_rule) == GuardOutcome::Authorized;
    let items: Vec<Route> = ITEMS
        .into_iter()
        .filter(|item| show_admins || !matches!(item, Route::Admins {}))
        .collect();

    rsx! {
        nav { class: "navigation",
            div { class: "nav-brand", "Splinx Planet" }
            ul { class: "nav-items",
                for item in items {
                    li {
                        key: "{item}",
                        class: if item == route { "nav-item active" } else { "nav-item" },
                        onclick: {
                            let target = item.clone();
                            move |_| {
                                nav.push(target.clone());
                            }
                        },
                        "{item.label()}"
                    }
                }
            }
        }
    }
}
