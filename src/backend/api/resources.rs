//! Resource catalogue and the CRUD calls built on it.

use super::client::ApiClient;
use super::error::ApiError;
use super::models::{ListPage, Record, Role};
use serde::Serialize;
use serde_json::Value;

const SUPERADMIN_ONLY: &[Role] = &[Role::SuperAdmin];

/// Every record type the dashboard manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Admins,
    Customers,
    Events,
    Adverts,
    Promos,
    SubscriptionPlans,
    EmailNotifications,
    PushNotifications,
}

impl ResourceKind {
    pub const ALL: [Self; 8] = [
        Self::Admins,
        Self::Customers,
        Self::Events,
        Self::Adverts,
        Self::Promos,
        Self::SubscriptionPlans,
        Self::EmailNotifications,
        Self::PushNotifications,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admins => "Admins",
            Self::Customers => "Customers",
            Self::Events => "Events",
            Self::Adverts => "Adverts",
            Self::Promos => "Promo codes",
            Self::SubscriptionPlans => "Subscription plans",
            Self::EmailNotifications => "Email notifications",
            Self::PushNotifications => "Push notifications",
        }
    }

    pub const fn list_endpoint(self) -> &'static str {
        match self {
            Self::Admins => "/admin/admin-get-all",
            Self::Customers => "/user/get-all-users",
            Self::Events => "/event",
            Self::Adverts => "/advert",
            Self::Promos => "/promo",
            Self::SubscriptionPlans => "/subscription-plan/plans",
            Self::EmailNotifications => "/email-notification",
            Self::PushNotifications => "/notification/system",
        }
    }

    /// Prefix for create (POST), update (PUT `/{id}`) and delete
    /// (DELETE `/{id}`).
    pub const fn base_path(self) -> &'static str {
        match self {
            Self::Admins => "/admin",
            Self::Customers => "/user",
            Self::Events => "/event",
            Self::Adverts => "/advert",
            Self::Promos => "/promo",
            Self::SubscriptionPlans => "/subscription-plan",
            Self::EmailNotifications => "/email-notification",
            Self::PushNotifications => "/notification",
        }
    }

    /// Key the list endpoint wraps its rows in, when it is not `data`.
    pub const fn envelope_key(self) -> &'static str {
        match self {
            Self::Admins => "admins",
            Self::Customers => "users",
            Self::Events => "events",
            Self::Adverts => "adverts",
            Self::Promos => "promos",
            Self::SubscriptionPlans => "plans",
            Self::EmailNotifications | Self::PushNotifications => "notifications",
        }
    }

    /// Fields shown as table columns, in order.
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::Admins => &["firstName", "lastName", "emailAddress", "role"],
            Self::Customers => &["firstName", "lastName", "emailAddress", "phoneNumber"],
            Self::Events => &["title", "location", "eventStartTime", "cost"],
            Self::Adverts => &["title", "link", "isActive"],
            Self::Promos => &["code", "discount", "expiryDate", "isActive"],
            Self::SubscriptionPlans => &["name", "price", "duration"],
            Self::EmailNotifications => &["subject", "recipients", "createdAt"],
            Self::PushNotifications => &["title", "message", "createdAt"],
        }
    }

    /// Roles allowed to manage this resource; `None` means any admin.
    pub const fn allowed_roles(self) -> Option<&'static [Role]> {
        match self {
            Self::Admins => Some(SUPERADMIN_ONLY),
            _ => None,
        }
    }

    pub fn normalize(self, raw: Value) -> ListPage {
        ListPage::from_value(raw, Some(self.envelope_key()))
    }

    fn item_path(self, id: &str) -> String {
        format!("{}/{id}", self.base_path())
    }
}

/// Email broadcast composed on the notifications screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmailDraft {
    pub subject: String,
    pub message: String,
    /// Empty means every customer.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipients: Vec<String>,
}

/// Push notification composed on the notifications screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PushDraft {
    pub title: String,
    pub message: String,
}

impl ApiClient {
    pub async fn list(&self, kind: ResourceKind) -> Result<ListPage, ApiError> {
        let raw: Value = self.get_json(kind.list_endpoint()).await?;
        Ok(kind.normalize(raw))
    }

    pub async fn create(&self, kind: ResourceKind, body: &Value) -> Result<Value, ApiError> {
        log::info!("Creating {}", kind.label());
        self.post_json(kind.base_path(), body).await
    }

    pub async fn update(&self, kind: ResourceKind, id: &str, body: &Value) -> Result<Value, ApiError> {
        log::info!("Updating {} {id}", kind.label());
        self.put_json(&kind.item_path(id), body).await
    }

    pub async fn delete_record(&self, kind: ResourceKind, record: &Record) -> Result<Value, ApiError> {
        let id = record
            .id
            .as_deref()
            .ok_or_else(|| ApiError::Decode(format!("{} record has no id", kind.label())))?;
        log::info!("Deleting {} {id}", kind.label());
        self.delete(&kind.item_path(id)).await
    }

    pub async fn send_email(&self, draft: &EmailDraft) -> Result<Value, ApiError> {
        log::info!("Sending email notification '{}'", draft.subject);
        self.post_json(ResourceKind::EmailNotifications.list_endpoint(), draft).await
    }

    pub async fn send_push(&self, draft: &PushDraft) -> Result<Value, ApiError> {
        log::info!("Sending push notification '{}'", draft.title);
        self.post_json(ResourceKind::PushNotifications.list_endpoint(), draft).await
    }
}
