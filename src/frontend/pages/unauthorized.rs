use crate::backend::utils::css::ResourceLoader;
use crate::backend::utils::route::Route;
use dioxus::prelude::*;
use dioxus_router::navigator;

#[component]
pub fn Unauthorized() -> Element {
    let nav = navigator();

    rsx! {
        style { dangerous_inner_html: ResourceLoader::get_css("main") }
        div { class: "centered",
            h1 { "Access denied" }
            p { class: "status-message", "Your role does not allow access to this page." }
            button {
                class: "button",
                onclick: move |_| {
                    nav.replace(Route::Dashboard {});
                },
                "Back to dashboard"
            }
        }
    }
}
