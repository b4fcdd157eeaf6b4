//! Loading-focused tests for configuration
//!
//! File parsing, precedence between layers, and environment overrides.

use std::io::Write;

use serial_test::serial;

use super::{load_config, load_toml_file, ClientConfig, ConfigError, SearchConvention};

const ENV_VARS: [&str; 9] = [
    "PLM_SOA_ENDPOINT",
    "PLM_SOA_MOCK_MODE",
    "PLM_SOA_TIMEOUT_MS",
    "PLM_SOA_SEARCH_LIMIT",
    "PLM_SOA_SEARCH_CONVENTION",
    "PLM_SOA_USER",
    "PLM_SOA_PASSWORD",
    "PLM_SOA_GROUP",
    "PLM_SOA_ROLE",
];

fn clear_env() {
    for name in ENV_VARS {
        std::env::remove_var(name);
    }
}

fn write_config(dir: &tempfile::TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    let written = std::fs::File::create(&path).and_then(|mut file| file.write_all(content.as_bytes()));
    assert!(written.is_ok(), "failed to write test config");
    path
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = write_config(
        &dir,
        r#"
endpoint = "https://plm.example.com/tc"

[search]
convention = "finder"
"#,
    );

    let config = load_toml_file(&path).unwrap_or_else(|_| ClientConfig::default());
    assert_eq!(config.endpoint, "https://plm.example.com/tc");
    assert_eq!(config.search.convention, SearchConvention::Finder);
    assert_eq!(config.search.default_limit, 50);
    assert_eq!(config.timeout_ms, 30_000);
}

#[test]
fn test_malformed_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = write_config(&dir, "endpoint = \n invalid toml [[[");

    let result = load_toml_file(&path);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_directory_path_rejected() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let result = load_toml_file(dir.path());
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("directory"));
    }
}

#[test]
#[serial]
fn test_explicit_missing_file_is_an_error() {
    clear_env();
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        load_config(Some(&missing)),
        Err(ConfigError::Read { .. })
    ));
}

#[test]
#[serial]
fn test_env_overrides_file() {
    clear_env();
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = write_config(
        &dir,
        r#"
endpoint = "https://file.example.com/tc"
timeout_ms = 5000

[search]
default_limit = 20

[credentials]
user = "from-file"
group = "Engineering"
"#,
    );

    std::env::set_var("PLM_SOA_ENDPOINT", "https://env.example.com/tc");
    std::env::set_var("PLM_SOA_USER", "from-env");
    let result = load_config(Some(&path));
    clear_env();

    let config = result.unwrap_or_else(|e| panic!("load failed: {e}"));
    assert_eq!(config.endpoint, "https://env.example.com/tc");
    assert_eq!(config.timeout_ms, 5000);
    assert_eq!(config.search.default_limit, 20);
    assert_eq!(config.credentials.user.as_deref(), Some("from-env"));
    assert_eq!(config.credentials.group.as_deref(), Some("Engineering"));
}

#[test]
#[serial]
fn test_invalid_env_value_rejected() {
    clear_env();
    std::env::set_var("PLM_SOA_TIMEOUT_MS", "soon");
    let result = ClientConfig::default().apply_env_vars();
    clear_env();

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("PLM_SOA_TIMEOUT_MS"));
    }
}

#[test]
#[serial]
fn test_env_search_convention() {
    clear_env();
    std::env::set_var("PLM_SOA_SEARCH_CONVENTION", "Finder");
    let result = ClientConfig::default().apply_env_vars();
    clear_env();

    let config = result.unwrap_or_default();
    assert_eq!(config.search.convention, SearchConvention::Finder);
}

#[test]
#[serial]
fn test_env_limit_out_of_range_fails_validation() {
    clear_env();
    std::env::set_var("PLM_SOA_SEARCH_LIMIT", "500");
    let result = ClientConfig::default()
        .apply_env_vars()
        .and_then(|config| config.validate());
    clear_env();

    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}
