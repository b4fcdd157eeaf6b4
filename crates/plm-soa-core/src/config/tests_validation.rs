//! Validation-focused tests for configuration

use super::{ClientConfig, ConfigError};

#[test]
fn test_defaults_are_valid() {
    assert!(ClientConfig::default().validate().is_ok());
}

#[test]
fn test_validation_rejects_empty_endpoint() {
    let config = ClientConfig {
        endpoint: "   ".to_string(),
        ..ClientConfig::default()
    };
    let result = config.validate();
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("endpoint cannot be empty"));
    }
}

#[test]
fn test_validation_rejects_non_http_endpoint() {
    let config = ClientConfig {
        endpoint: "ftp://plm.example.com".to_string(),
        ..ClientConfig::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validation_rejects_zero_timeout() {
    let config = ClientConfig {
        timeout_ms: 0,
        ..ClientConfig::default()
    };
    let result = config.validate();
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("timeout_ms"));
    }
}

#[test]
fn test_validation_search_limit_range() {
    for limit in [0, -5, 101] {
        let mut config = ClientConfig::default();
        config.search.default_limit = limit;
        let result = config.validate();
        assert!(result.is_err(), "limit {limit} should be rejected");
        if let Err(e) = result {
            assert!(e.to_string().contains("search.default_limit must be 1-100"));
        }
    }

    for limit in [1, 100] {
        let mut config = ClientConfig::default();
        config.search.default_limit = limit;
        assert!(config.validate().is_ok(), "limit {limit} should be accepted");
    }
}

#[test]
fn test_validation_rejects_blank_provider() {
    let mut config = ClientConfig::default();
    config.search.provider_name = String::new();
    assert!(config.validate().is_err());
}
