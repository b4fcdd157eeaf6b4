//! Global setup utilities for CLI initialization
//!
//! - Logging initialization with tracing
//! - Configuration assembly from files, environment and flags

use anyhow::{Context, Result};
use clap::ArgMatches;
use plm_soa_core::{config::load_config, ClientConfig, Credentials};

/// Initialize tracing subscriber for logging
///
/// Configures the tracing subscriber with:
/// - Environment filter (defaults to INFO level)
/// - Stderr output (stdout carries the JSON result)
///
/// # Errors
/// Returns an error if the subscriber initialization fails
pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))
}

/// Load the layered configuration and apply command-line overrides.
///
/// # Errors
/// Returns an error if loading fails or the overridden config is invalid
pub fn resolve_config(matches: &ArgMatches) -> Result<ClientConfig> {
    let explicit = matches.get_one::<std::path::PathBuf>("config");
    let config = load_config(explicit.map(std::path::PathBuf::as_path))
        .context("Failed to load configuration")?;
    let config = apply_flags(config, matches);
    config.validate().context("Invalid configuration after command-line overrides")?;
    Ok(config)
}

fn apply_flags(mut config: ClientConfig, matches: &ArgMatches) -> ClientConfig {
    if let Some(endpoint) = matches.get_one::<String>("endpoint") {
        config.endpoint.clone_from(endpoint);
    }
    if let Some(user) = matches.get_one::<String>("user") {
        config.credentials.user = Some(user.clone());
    }
    if let Some(password) = matches.get_one::<String>("password") {
        config.credentials.password = Some(password.clone());
    }
    config
}

/// Login credentials from the resolved config. Missing user or password
/// stay empty and are rejected by the login command itself.
pub fn credentials(config: &ClientConfig) -> Credentials {
    let source = &config.credentials;
    let credentials = Credentials::new(
        source.user.clone().unwrap_or_default(),
        source.password.clone().unwrap_or_default(),
    );
    let credentials = match &source.group {
        Some(group) => credentials.with_group(group.clone()),
        None => credentials,
    };
    let credentials = match &source.role {
        Some(role) => credentials.with_role(role.clone()),
        None => credentials,
    };
    match &source.locale {
        Some(locale) => credentials.with_locale(locale.clone()),
        None => credentials,
    }
}
