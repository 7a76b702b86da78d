use crate::backend::utils::css::ResourceLoader;
use crate::backend::utils::route::Route;
use crate::frontend::components::auth::ProtectedRoute;
use crate::frontend::components::layout::Navigation;
use crate::frontend::services::context::{use_auth, use_services};
use dioxus::prelude::*;
use dioxus_router::{components::Outlet, navigator};

/// Frame around every signed-in page: sidebar, header and the routed page.
#[component]
pub fn Shell() -> Element {
    let auth = use_auth();
    let services = use_services();
    let nav = navigator();

    let name = auth.display_name();
    let role = auth
        .current_user()
        .map(|user| user.role.to_string())
        .unwrap_or_default();

    rsx! {
        style { dangerous_inner_html: ResourceLoader::get_app_css() }

        ProtectedRoute {
            div { class: "shell",
                Navigation {}

                div { class: "main-column",
                    header { class: "header",
                        span { class: "user-name", "{name}" }
                        span { class: "user-role status-message", "{role}" }
                        button {
                            class: "button button-secondary",
                            onclick: move |_| {
                                services.store.logout();
                                nav.replace(Route::Login {});
                            },
                            "Log out"
                        }
                    }

                    main { class: "content",
                        Outlet::<Route> {}
                    }
                }
            }
        }
    }
}
