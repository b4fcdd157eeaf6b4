//! Caller-facing data shapes
//!
//! These are the stable types commands hand back. Raw server objects are
//! turned into them by [`crate::normalize`].

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::{collections::BTreeMap, fmt};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized PLM business object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainObject {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub name: String,
    pub description: String,
    /// Every property the server sent, as received.
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

/// Login credentials, forwarded verbatim to the login operation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Credentials {
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub locale: String,
    /// Session discriminator; the server spells the field `descrimator`.
    #[serde(default, rename = "descrimator")]
    pub discriminator: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("group", &self.group)
            .field("role", &self.role)
            .field("locale", &self.locale)
            .field("discriminator", &self.discriminator)
            .finish()
    }
}

/// Authenticated user as reported by login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserInfo {
    pub uid: String,
    pub user_id: String,
    pub name: String,
}

/// Server session created by a successful login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// `serverInfo` block returned by login, kept opaque.
    #[serde(default)]
    pub server_info: Option<Value>,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user: None,
            expires_at: None,
            server_info: None,
        }
    }

    /// A session with no expiry is considered valid until logout.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.session_id.is_empty() && self.expires_at.map_or(true, |expiry| now < expiry)
    }
}

/// Details about the current server session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionInfo {
    pub user: Option<String>,
    pub group: Option<String>,
    pub role: Option<String>,
    pub server_version: Option<String>,
    /// Keys the normalizer does not know about.
    #[serde(default)]
    pub extra: BTreeMap<String, Value>,
}

/// Business object type as described by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TypeDescription {
    pub name: String,
    pub display_name: String,
    pub parent: Option<String>,
    #[serde(default)]
    pub subtypes: Vec<String>,
}

/// Outcome of a property update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedItem {
    pub id: String,
    /// Names of the properties that were written.
    pub properties: Vec<String>,
}
