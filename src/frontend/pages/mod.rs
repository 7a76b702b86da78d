//! Routed pages.

pub mod dashboard;
pub mod login;
pub mod not_found;
pub mod notifications;
pub mod resources;
pub mod unauthorized;

pub use dashboard::Dashboard;
pub use login::Login;
pub use not_found::NotFound;
pub use notifications::SendNotification;
pub use resources::{
    Admins, Adverts, Customers, EmailNotifications, Events, Promos, PushNotifications,
    SubscriptionPlans,
};
pub use unauthorized::Unauthorized;
