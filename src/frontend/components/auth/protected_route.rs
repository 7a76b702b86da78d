use crate::backend::api::Role;
use crate::backend::services::guard::{self, GuardOutcome};
use crate::frontend::services::context::use_auth;
use dioxus::prelude::*;
use dioxus_router::navigator;

/// Renders `children` only for a signed-in admin whose role passes
/// `allowed_roles`. Anyone else is sent to the login or unauthorized page.
#[component]
pub fn ProtectedRoute(
    #[props(default)] allowed_roles: Option<&'static [Role]>,
    children: Element,
) -> Element {
    let auth = use_auth();
    let nav = navigator();

    let outcome = use_memo(move || guard::evaluate(&auth.session.read(), allowed_roles));

    use_effect(move || {
        let outcome = outcome();
        let Some(path) = outcome.redirect_path() else {
            return;
        };
        // Login replaces the current history entry.
        if outcome == GuardOutcome::RedirectToLogin {
            nav.replace(path);
        } else {
            nav.push(path);
        }
    });

    match outcome() {
        GuardOutcome::Authorized => children,
        GuardOutcome::Pending => rsx! {
            div { class: "status-message", "Restoring session..." }
        },
        GuardOutcome::RedirectToLogin | GuardOutcome::RedirectToUnauthorized => rsx! {},
    }
}
