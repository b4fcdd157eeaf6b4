//! Correlation helpers for request/response logging
//!
//! Each command invocation has a request id. These helpers emit the paired
//! outbound/inbound events under that id so a call can be followed through
//! the logs.

use serde_json::Value;
use uuid::Uuid;

use crate::error_codes::ErrorDetail;

/// Payload keys whose values must never reach the logs.
const REDACTED_KEYS: [&str; 2] = ["password", "credentials"];

fn redact(payload: &Value) -> Value {
    match payload {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| {
                    if REDACTED_KEYS.contains(&key.as_str()) {
                        (key.clone(), Value::String("<redacted>".to_string()))
                    } else {
                        (key.clone(), redact(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        other => other.clone(),
    }
}

/// Log an outbound call and return the id it was logged under.
pub fn log_request(request_id: Uuid, service: &str, operation: &str, payload: &Value) -> Uuid {
    tracing::debug!(
        request_id = %request_id,
        service,
        operation,
        payload = %redact(payload),
        "SOA request"
    );
    request_id
}

/// Log the outcome paired with [`log_request`].
pub fn log_response<T>(request_id: Uuid, outcome: &Result<T, ErrorDetail>) {
    match outcome {
        Ok(_) => tracing::debug!(request_id = %request_id, "SOA response ok"),
        Err(error) => tracing::error!(
            request_id = %request_id,
            code = %error.code,
            message = %error.message,
            "SOA response error"
        ),
    }
}
