//! Sign-in page.

use crate::backend::services::auth::{self, Credentials};
use crate::backend::utils::css::ResourceLoader;
use crate::backend::utils::route::Route;
use crate::backend::utils::runtime;
use crate::frontend::services::context::{use_auth, use_services};
use dioxus::prelude::*;
use dioxus_router::use_navigator;

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let services = use_services();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    // Already signed in: go straight to the dashboard.
    use_effect(move || {
        if auth.is_authenticated() && !auth.session.read().is_restoring() {
            nav.replace(Route::Dashboard {});
        }
    });

    let submit = use_callback(move |_: ()| {
        if submitting() {
            return;
        }
        let credentials = Credentials::new(email.read().clone(), password.read().clone());
        let store = services.store.clone();
        let client = services.client.clone();

        error.set(None);
        submitting.set(true);
        spawn(async move {
            let result =
                runtime::run(async move { auth::login(&store, &client, &credentials).await }).await;
            submitting.set(false);
            match result {
                Ok(Ok(_)) => {
                    nav.push(Route::Dashboard {});
                }
                Ok(Err(e)) => error.set(Some(e.to_string())),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    });

    rsx! {
        style { dangerous_inner_html: ResourceLoader::get_css("main") }
        style { dangerous_inner_html: ResourceLoader::get_css("auth") }

        div { class: "auth-container",
            div { class: "auth-card",
                h1 { class: "auth-title", "Splinx Planet Admin" }
                form {
                    class: "form",
                    onsubmit: move |e| {
                        e.prevent_default();
                        submit.call(());
                    },
                    input {
                        r#type: "email",
                        placeholder: "Email address",
                        value: "{email}",
                        autofocus: true,
                        oninput: move |e| email.set(e.value()),
                    }
                    input {
                        r#type: "password",
                        placeholder: "Password",
                        value: "{password}",
                        oninput: move |e| password.set(e.value()),
                    }
                    if let Some(message) = error() {
                        div { class: "error-message", "{message}" }
                    }
                    button {
                        class: "button",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Signing in..." } else { "Sign in" }
                    }
                }
            }
        }
    }
}
