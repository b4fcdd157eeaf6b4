//! Configuration merging logic (Immutable functional pattern)
//!
//! Later configs override earlier ones. A field that still holds its
//! built-in default in `other` is treated as "not set" and keeps the value
//! from `self`.

use super::{
    defaults::{
        default_attributes, DEFAULT_ENDPOINT, DEFAULT_SEARCH_LIMIT, DEFAULT_SEARCH_PROVIDER,
        DEFAULT_TIMEOUT_MS,
    },
    types::{ClientConfig, CredentialsConfig, SearchConfig, SearchConvention},
};

impl ClientConfig {
    /// Merge another config into this one (other takes precedence) - immutable pattern
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint: if other.endpoint.is_empty() || other.endpoint == DEFAULT_ENDPOINT {
                self.endpoint
            } else {
                other.endpoint
            },
            mock_mode: other.mock_mode.or(self.mock_mode),
            timeout_ms: if other.timeout_ms == DEFAULT_TIMEOUT_MS {
                self.timeout_ms
            } else {
                other.timeout_ms
            },
            search: self.search.merge(other.search),
            credentials: self.credentials.merge(other.credentials),
        }
    }
}

impl SearchConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            default_limit: if other.default_limit == DEFAULT_SEARCH_LIMIT {
                self.default_limit
            } else {
                other.default_limit
            },
            provider_name: if other.provider_name == DEFAULT_SEARCH_PROVIDER {
                self.provider_name
            } else {
                other.provider_name
            },
            convention: if other.convention == SearchConvention::default() {
                self.convention
            } else {
                other.convention
            },
            attributes: if other.attributes == default_attributes() {
                self.attributes
            } else {
                other.attributes
            },
        }
    }
}

impl CredentialsConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            user: other.user.or(self.user),
            password: other.password.or(self.password),
            group: other.group.or(self.group),
            role: other.role.or(self.role),
            locale: other.locale.or(self.locale),
        }
    }
}
