//! Configuration validation

use super::{types::ClientConfig, ConfigError};
use crate::operations::search::MAX_LIMIT;

impl ClientConfig {
    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any values are out of range or invalid
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::Invalid("endpoint cannot be empty".to_string()));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "endpoint must start with http:// or https:// (got: {endpoint})"
            )));
        }

        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.search.default_limit <= 0 || self.search.default_limit > MAX_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "search.default_limit must be 1-{MAX_LIMIT}"
            )));
        }

        if self.search.provider_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "search.provider_name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
