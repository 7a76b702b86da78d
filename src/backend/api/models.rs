//! Payload models shared by the API client and the UI.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Coarse authorization label attached to every admin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    SuperAdmin,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SuperAdmin => "superadmin",
            Self::Admin => "admin",
            Self::Other(role) => role,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "superadmin" => Self::SuperAdmin,
            "admin" => Self::Admin,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A signed-in admin as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub email_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email_address.clone()
        } else {
            name.to_string()
        }
    }
}

/// Body sent to the login endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub email_address: &'a str,
    pub password: &'a str,
}

/// Body returned by the login endpoint, for both outcomes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
    pub admin: Option<User>,
    pub message: Option<String>,
}

/// One row of any resource list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub id: Option<String>,
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn from_value(value: Value) -> Self {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                let mut fields = Map::new();
                fields.insert("value".to_string(), other);
                fields
            }
        };
        let id = ["_id", "id"]
            .iter()
            .find_map(|key| fields.get(*key).and_then(value_as_id));
        Self { id, fields }
    }

    /// Renders a field for a table cell. Nested values are flattened to JSON.
    pub fn display(&self, field: &str) -> String {
        match self.fields.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(b)) => if *b { "Yes" } else { "No" }.to_string(),
            Some(other) => other.to_string(),
        }
    }
}

fn value_as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Canonical list shape every resource list is normalised into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListPage {
    pub items: Vec<Record>,
    pub total: usize,
    pub page: Option<u64>,
    pub total_pages: Option<u64>,
}

impl ListPage {
    /// Envelope keys tried, in order, when no resource-specific key matches.
    const FALLBACK_KEYS: [&'static str; 3] = ["data", "items", "results"];

    /// Normalises a raw list payload. Accepts a bare array, `{data: [...]}`,
    /// `{<key>: [...]}`, or a nested `{data: {<key>: [...]}}`.
    pub fn from_value(value: Value, key_hint: Option<&str>) -> Self {
        match value {
            Value::Array(items) => Self::from_items(items),
            Value::Object(mut envelope) => {
                let mut page = Self::pagination(&envelope);
                let items = key_hint
                    .into_iter()
                    .chain(Self::FALLBACK_KEYS)
                    .find_map(|key| match envelope.remove(key) {
                        Some(Value::Array(items)) => Some(items),
                        Some(Value::Object(inner)) => {
                            let nested = Self::from_value(Value::Object(inner), key_hint);
                            page.fill_from(&nested);
                            Some(nested.items.into_iter().map(|r| Value::Object(r.fields)).collect())
                        }
                        Some(other) => {
                            envelope.insert(key.to_string(), other);
                            None
                        }
                        None => None,
                    })
                    .or_else(|| {
                        envelope.into_iter().find_map(|(_, v)| match v {
                            Value::Array(items) => Some(items),
                            _ => None,
                        })
                    })
                    .unwrap_or_default();
                let mut list = Self::from_items(items);
                list.page = page.page;
                list.total_pages = page.total_pages;
                if let Some(total) = page.total {
                    list.total = total;
                }
                list
            }
            _ => Self::default(),
        }
    }

    fn from_items(items: Vec<Value>) -> Self {
        let items: Vec<Record> = items.into_iter().map(Record::from_value).collect();
        Self {
            total: items.len(),
            items,
            page: None,
            total_pages: None,
        }
    }

    fn pagination(envelope: &Map<String, Value>) -> Pagination {
        let number = |keys: &[&str]| keys.iter().find_map(|k| envelope.get(*k).and_then(Value::as_u64));
        Pagination {
            total: number(&["total", "totalCount", "count"]).and_then(|n| usize::try_from(n).ok()),
            page: number(&["page", "currentPage"]),
            total_pages: number(&["totalPages", "pages"]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

struct Pagination {
    total: Option<usize>,
    page: Option<u64>,
    total_pages: Option<u64>,
}

impl Pagination {
    fn fill_from(&mut self, nested: &ListPage) {
        self.total = self.total.or(Some(nested.total));
        self.page = self.page.or(nested.page);
        self.total_pages = self.total_pages.or(nested.total_pages);
    }
}
