//! Default configuration values

use super::types::{ClientConfig, SearchConfig, SearchConvention};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:7001/tc";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_SEARCH_LIMIT: i64 = 50;
pub const DEFAULT_SEARCH_PROVIDER: &str = "Awp0FullTextSearchProvider";

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            mock_mode: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            search: SearchConfig::default(),
            credentials: super::types::CredentialsConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_SEARCH_LIMIT,
            provider_name: DEFAULT_SEARCH_PROVIDER.to_string(),
            convention: SearchConvention::default(),
            attributes: default_attributes(),
        }
    }
}

pub fn default_attributes() -> Vec<String> {
    [
        "object_name",
        "object_desc",
        "object_type",
        "item_id",
        "item_revision_id",
        "owning_user",
        "last_mod_date",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}
