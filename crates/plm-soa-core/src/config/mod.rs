//! Client configuration
//!
//! # Hierarchy
//!
//! Configuration is loaded in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config: ~/.config/plm-soa/config.toml
//! 3. Project config: .plm-soa/config.toml
//! 4. Explicit config file (CLI `--config`)
//! 5. Environment variables: PLM_SOA_*
//! 6. CLI flags (command-specific)
//!
//! # Example Config
//!
//! ```toml
//! endpoint = "https://plm.example.com/tc"
//! timeout_ms = 20000
//!
//! [search]
//! default_limit = 25
//! convention = "finder"
//!
//! [credentials]
//! user = "integration"
//! group = "Engineering"
//! ```
//!
//! # Module Structure
//!
//! - `types`: Configuration structure definitions
//! - `defaults`: Default value implementations
//! - `load`: Loading from files and environment
//! - `merge`: Configuration merging logic
//! - `validate`: Validation rules

mod defaults;
mod load;
mod merge;
mod types;
mod validate;

#[cfg(test)]
mod tests_loading;
#[cfg(test)]
mod tests_validation;

pub use load::{global_config_path, load_config, load_toml_file, project_config_path};
pub use types::{ClientConfig, CredentialsConfig, SearchConfig, SearchConvention};

/// Errors raised while loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid {variable} value: {reason}")]
    InvalidEnv { variable: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
