//! Records exchanged with the `ReefStars` API.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields the client knows about on a user record.
const USER_FIELDS: [&str; 6] = ["id", "fullName", "email", "phone", "avatar", "createdAt"];

/// The authenticated user.
///
/// Serialized as camelCase JSON, which is also the format kept in durable storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user's unique ID.
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Email address, also used as login identifier.
    pub email: String,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Optional avatar, either an absolute URL or a path under `/uploads`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Parses a user record as sent by the server.
    ///
    /// `_id` is accepted when `id` is missing. Fields the client does not know
    /// about are logged and dropped instead of being carried along.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let Value::Object(mut fields) = value else {
            return serde_json::from_value(value);
        };

        if !fields.contains_key("id") {
            if let Some(id) = fields.remove("_id") {
                fields.insert("id".to_string(), id);
            }
        }

        let unknown: Vec<String> = fields
            .keys()
            .filter(|key| !USER_FIELDS.contains(&key.as_str()))
            .cloned()
            .collect();

        if !unknown.is_empty() {
            tracing::debug!(fields = ?unknown, "dropping unknown user fields");
            fields.retain(|key, _| USER_FIELDS.contains(&key.as_str()));
        }

        // `null` optionals are as good as missing.
        let known: Map<String, Value> = fields.into_iter().filter(|(_, v)| !v.is_null()).collect();

        serde_json::from_value(Value::Object(known))
    }

    /// Merges a fresher copy of this user coming back from the server.
    ///
    /// Required fields are taken from `newer`; optional ones only when present.
    pub fn merge(&mut self, newer: Self) {
        self.id = newer.id;
        self.full_name = newer.full_name;
        self.email = newer.email;
        self.created_at = newer.created_at;

        if newer.phone.is_some() {
            self.phone = newer.phone;
        }
        if newer.avatar.is_some() {
            self.avatar = newer.avatar;
        }
    }
}

/// The response wrapper used by every endpoint of the API.
///
/// ```json
/// { "success": true, "token": "...", "data": { ... }, "total": 12 }
/// ```
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
    pub data: Option<T>,
    pub total: Option<u64>,
    pub message: Option<String>,
}

/// `data` payload of the auth endpoints: `{ "user": { ... } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct UserData {
    pub user: Value,
}

impl UserData {
    pub(crate) fn into_user(self) -> Result<User, serde_json::Error> {
        User::from_value(self.user)
    }
}

/// A page of records returned by a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    /// Records of the current page.
    pub items: Vec<T>,
    /// Total amount of matching records, when the endpoint reports it.
    pub total: Option<u64>,
}

impl<T: DeserializeOwned> Listing<T> {
    pub(crate) fn from_envelope(envelope: Envelope<Vec<T>>) -> Self {
        Self {
            items: envelope.data.unwrap_or_default(),
            total: envelope.total,
        }
    }
}

/// A freshly issued session: the bearer token and the user it belongs to.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated user.
    pub user: User,
}

impl std::fmt::Debug for AuthGrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGrant")
            .field("token", &"***REDACTED***")
            .field("user", &self.user)
            .finish()
    }
}
