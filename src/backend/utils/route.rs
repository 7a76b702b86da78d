use crate::frontend::components::layout::Shell;
use crate::frontend::pages::{
    Admins, Adverts, Customers, Dashboard, EmailNotifications, Events, Login, NotFound, Promos,
    PushNotifications, SendNotification, SubscriptionPlans, Unauthorized,
};

use dioxus::prelude::*;
use dioxus_router::Routable;

#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[redirect("/", || Route::Dashboard {})]
    #[route("/login")]
    Login {},
    #[route("/unauthorized")]
    Unauthorized {},
    #[layout(Shell)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/admins")]
        Admins {},
        #[route("/customers")]
        Customers {},
        #[route("/events")]
        Events {},
        #[route("/adverts")]
        Adverts {},
        #[route("/promos")]
        Promos {},
        #[route("/subscription-plans")]
        SubscriptionPlans {},
        #[route("/notifications/email")]
        EmailNotifications {},
        #[route("/notifications/push")]
        PushNotifications {},
        #[route("/notifications/send")]
        SendNotification {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

impl Route {
    /// Sidebar label for routes that appear in the navigation.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Login {} => "Login",
            Route::Unauthorized {} => "Unauthorized",
            Route::Dashboard {} => "Dashboard",
            Route::Admins {} => "Admins",
            Route::Customers {} => "Customers",
            Route::Events {} => "Events",
            Route::Adverts {} => "Adverts",
            Route::Promos {} => "Promo Codes",
            Route::SubscriptionPlans {} => "Subscription Plans",
            Route::EmailNotifications {} => "Email Notifications",
            Route::PushNotifications {} => "Push Notifications",
            Route::SendNotification {} => "Send Notification",
            Route::NotFound { .. } => "Not Found",
        }
    }
}
