//! Configuration loading from files and environment (Immutable functional pattern)
//!
//! This module handles loading configuration from:
//! 1. Built-in defaults
//! 2. Global config: ~/.config/plm-soa/config.toml
//! 3. Project config: .plm-soa/config.toml
//! 4. An explicit config file, when the caller names one
//! 5. Environment variables: PLM_SOA_*
//!
//! All operations return new instances rather than mutating in place.

use std::path::{Path, PathBuf};

use super::{types::ClientConfig, ConfigError};

// ═══════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════

/// Load configuration from all sources with hierarchy (immutable functional pattern)
///
/// # Errors
///
/// Returns error if:
/// - A config file is unreadable or malformed TOML
/// - An explicit config file does not exist
/// - An environment override has an invalid value
/// - The merged config fails validation
pub fn load_config(explicit: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    // 1. Start with built-in defaults
    let config = ClientConfig::default();

    // 2. Load global config if exists
    let config = match global_config_path() {
        Some(global_path) if global_path.exists() => config.merge(load_toml_file(&global_path)?),
        _ => config,
    };

    // 3. Load project config if exists
    let project_path = project_config_path()?;
    let config = if project_path.exists() {
        config.merge(load_toml_file(&project_path)?)
    } else {
        config
    };

    // 4. Explicit file must exist when named
    let config = match explicit {
        Some(path) => config.merge(load_toml_file(path)?),
        None => config,
    };

    // 5. Apply environment variable overrides
    let config = config.apply_env_vars()?;

    config.validate()?;
    tracing::debug!(endpoint = %config.endpoint, mock_mode = config.is_mock_mode(), "Configuration loaded");
    Ok(config)
}

// ═══════════════════════════════════════════════════════════════════════════
// PATH HELPERS
// ═══════════════════════════════════════════════════════════════════════════

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "plm-soa")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
pub fn project_config_path() -> Result<PathBuf, ConfigError> {
    std::env::current_dir()
        .map(|dir| dir.join(".plm-soa/config.toml"))
        .map_err(|e| ConfigError::Read {
            path: ".".to_string(),
            reason: format!("Failed to get current directory: {e}"),
        })
}

/// Load a TOML file into a partial config
///
/// Missing keys take their defaults, which the merge treats as "not set".
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read
/// - Path is a directory instead of a file
/// - TOML is malformed
pub fn load_toml_file(path: &Path) -> Result<ClientConfig, ConfigError> {
    if path.is_dir() {
        return Err(ConfigError::Read {
            path: path.display().to_string(),
            reason: "path is a directory, expected a TOML file such as .plm-soa/config.toml"
                .to_string(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// ENVIRONMENT VARIABLE OVERRIDES (Immutable pattern)
// ═══════════════════════════════════════════════════════════════════════════

fn invalid_env(variable: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnv {
        variable: variable.to_string(),
        reason: reason.to_string(),
    }
}

impl ClientConfig {
    /// Apply environment variable overrides - immutable pattern
    ///
    /// # Errors
    ///
    /// Returns error if environment variable values are invalid
    pub fn apply_env_vars(mut self) -> Result<Self, ConfigError> {
        // PLM_SOA_ENDPOINT
        if let Ok(value) = std::env::var("PLM_SOA_ENDPOINT") {
            if value.trim().is_empty() {
                return Err(invalid_env(
                    "PLM_SOA_ENDPOINT",
                    "cannot be empty - unset the variable or provide a URL",
                ));
            }
            self.endpoint = value;
        }

        // PLM_SOA_MOCK_MODE
        if let Ok(value) = std::env::var("PLM_SOA_MOCK_MODE") {
            self.mock_mode = Some(
                value
                    .parse()
                    .map_err(|e| invalid_env("PLM_SOA_MOCK_MODE", e))?,
            );
        }

        // PLM_SOA_TIMEOUT_MS
        if let Ok(value) = std::env::var("PLM_SOA_TIMEOUT_MS") {
            self.timeout_ms = value
                .parse()
                .map_err(|e| invalid_env("PLM_SOA_TIMEOUT_MS", e))?;
        }

        // PLM_SOA_SEARCH_LIMIT
        if let Ok(value) = std::env::var("PLM_SOA_SEARCH_LIMIT") {
            self.search.default_limit = value
                .parse()
                .map_err(|e| invalid_env("PLM_SOA_SEARCH_LIMIT", e))?;
        }

        // PLM_SOA_SEARCH_CONVENTION
        if let Ok(value) = std::env::var("PLM_SOA_SEARCH_CONVENTION") {
            self.search.convention = value
                .parse()
                .map_err(|e| invalid_env("PLM_SOA_SEARCH_CONVENTION", e))?;
        }

        // Credentials: plain strings, empty means unset
        let credential = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        self.credentials.user = credential("PLM_SOA_USER").or(self.credentials.user);
        self.credentials.password = credential("PLM_SOA_PASSWORD").or(self.credentials.password);
        self.credentials.group = credential("PLM_SOA_GROUP").or(self.credentials.group);
        self.credentials.role = credential("PLM_SOA_ROLE").or(self.credentials.role);

        Ok(self)
    }
}
