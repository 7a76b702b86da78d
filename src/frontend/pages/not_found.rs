use crate::backend::utils::css::ResourceLoader;
use crate::backend::utils::route::Route;
use dioxus::prelude::*;
use dioxus_router::navigator;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = navigator();
    let path = format!("/{}", segments.join("/"));

    rsx! {
        style { dangerous_inner_html: ResourceLoader::get_css("main") }
        div { class: "centered",
            h1 { "Page not found" }
            p { class: "status-message", "Nothing lives at {path}." }
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
