//! Configuration type definitions
//!
//! Pure data holders; behavior lives in the sibling modules.

use serde::{Deserialize, Serialize};

use crate::operations::services;

/// Root configuration structure
///
/// Loaded from defaults → global → project → explicit file → env vars → CLI flags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the SOA web tier, e.g. `https://plm.example.com/tc`
    pub endpoint: String,
    /// Route calls to the substitute server instead of `endpoint`.
    /// Unset means "inherit"; see [`ClientConfig::is_mock_mode`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock_mode: Option<bool>,
    pub timeout_ms: u64,
    pub search: SearchConfig,
    pub credentials: CredentialsConfig,
}

impl ClientConfig {
    pub fn is_mock_mode(&self) -> bool {
        self.mock_mode.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Limit used when a caller does not pass one
    pub default_limit: i64,
    pub provider_name: String,
    pub convention: SearchConvention,
    /// Attributes the server should inflate on each result
    pub attributes: Vec<String>,
}

/// Which search service the server exposes.
///
/// Servers differ: some answer saved-query searches, newer ones the finder
/// service. Both accept the same `searchInput` payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchConvention {
    #[default]
    SavedQuery,
    Finder,
}

impl SearchConvention {
    /// `(service, operation)` pair for this convention.
    pub const fn route(self) -> (&'static str, &'static str) {
        match self {
            Self::SavedQuery => (services::SAVED_QUERY, services::PERFORM_SAVED_SEARCH),
            Self::Finder => (services::FINDER, services::PERFORM_SEARCH),
        }
    }
}

impl std::str::FromStr for SearchConvention {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "saved_query" | "savedquery" => Ok(Self::SavedQuery),
            "finder" => Ok(Self::Finder),
            other => Err(format!("unknown search convention '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CredentialsConfig {
    pub user: Option<String>,
    pub password: Option<String>,
    pub group: Option<String>,
    pub role: Option<String>,
    pub locale: Option<String>,
}
