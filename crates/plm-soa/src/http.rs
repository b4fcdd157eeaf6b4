//! reqwest transport speaking the JSON REST binding of the SOA protocol
//!
//! Every call is a POST to `{endpoint}/JsonRestServices/{service}/{operation}`
//! with the payload wrapped in the standard request envelope. The server
//! tracks the session with a `JSESSIONID` cookie; it is captured from
//! responses and attached to later requests.
//!
//! Failures are classified here, at the wire, so commands can pick precise
//! error codes:
//!
//! | Condition | Category |
//! |---|---|
//! | request timed out | `API_TIMEOUT` |
//! | connection failed | `NETWORK` |
//! | HTTP 401 / 403, `InvalidCredentialsException` | `AUTH_SESSION` |
//! | other non-2xx, service exception body | `API_RESPONSE` |
//! | body is not JSON | `DATA_PARSING` |

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::{sync::RwLock, time::Duration};

use anyhow::Context;
use plm_soa_core::{ClientConfig, SoaError, SoaTransport, TransportSettings};
use reqwest::{
    header::{HeaderMap, COOKIE, SET_COOKIE},
    StatusCode,
};
use serde_json::{json, Value};

pub const SESSION_COOKIE: &str = "JSESSIONID";
const REST_PATH: &str = "JsonRestServices";
const EXCEPTION_KEY: &str = ".QName";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

pub struct HttpTransport {
    client: reqwest::Client,
    settings: TransportSettings,
    session_id: RwLock<Option<String>>,
}

impl HttpTransport {
    /// Build a transport for `config.endpoint` with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be initialized.
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("Failed to initialize HTTP client")?;

        if config.is_mock_mode() {
            tracing::info!(endpoint = %config.endpoint, "Transport running in mock mode");
        }

        Ok(Self {
            client,
            settings: TransportSettings {
                endpoint: config.endpoint.trim_end_matches('/').to_string(),
                mock_mode: config.is_mock_mode(),
            },
            session_id: RwLock::new(None),
        })
    }

    fn url(&self, service: &str, operation: &str) -> String {
        format!("{}/{REST_PATH}/{service}/{operation}", self.settings.endpoint)
    }

    fn remember_cookie(&self, headers: &HeaderMap) {
        if let Some(session_id) = session_cookie(headers) {
            tracing::debug!("Captured session cookie");
            self.set_session_id(Some(session_id));
        }
    }
}

#[async_trait::async_trait]
impl SoaTransport for HttpTransport {
    async fn call(&self, service: &str, operation: &str, payload: Value) -> anyhow::Result<Value> {
        let url = self.url(service, operation);
        let envelope = json!({
            "header": { "state": {}, "policy": {} },
            "body": payload
        });

        let request = self.client.post(&url).json(&envelope);
        let request = match self.session_id() {
            Some(session_id) => request.header(COOKIE, format!("{SESSION_COOKIE}={session_id}")),
            None => request,
        };

        let response = request.send().await.map_err(|e| {
            transport_failure(&e)
                .with_context("url", url.clone())
                .with_cause(e.into())
        })?;

        self.remember_cookie(response.headers());
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            transport_failure(&e)
                .with_context("url", url.clone())
                .with_cause(e.into())
        })?;

        if !status.is_success() {
            return Err(status_failure(status, &text).with_context("url", url).into());
        }

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            SoaError::parsing(format!("Response from {service}.{operation} is not valid JSON"))
                .with_context("url", url.clone())
                .with_cause(e.into())
        })?;

        match exception_failure(&body) {
            Some(failure) => Err(failure.with_context("url", url).into()),
            None => Ok(body),
        }
    }

    fn session_id(&self) -> Option<String> {
        self.session_id.read().ok().and_then(|slot| slot.clone())
    }

    fn set_session_id(&self, session_id: Option<String>) {
        match self.session_id.write() {
            Ok(mut slot) => *slot = session_id,
            Err(e) => tracing::warn!("Session id lock poisoned: {e}"),
        }
    }

    fn settings(&self) -> &TransportSettings {
        &self.settings
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════

fn transport_failure(error: &reqwest::Error) -> SoaError {
    if error.is_timeout() {
        SoaError::timeout(format!("Request timed out: {error}"))
    } else if error.is_decode() {
        SoaError::parsing(format!("Failed to read response: {error}"))
    } else {
        SoaError::network(format!("Request failed: {error}"))
    }
}

/// Failure for a non-2xx answer. The body is kept when it is JSON so the
/// nested server message can be recovered.
pub fn status_failure(status: StatusCode, text: &str) -> SoaError {
    let message = format!("Request failed with status {}", status.as_u16());
    let failure = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SoaError::auth_session(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => SoaError::timeout(message),
        _ => SoaError::api_response(message),
    };
    let failure = failure.with_context("status", status.as_u16().to_string());

    match serde_json::from_str::<Value>(text) {
        Ok(body) => {
            let failure = match exception_message(&body) {
                Some(detail) => SoaError::new(failure.category(), detail)
                    .with_context("status", status.as_u16().to_string()),
                None => failure,
            };
            failure.with_response(body)
        }
        Err(_) => failure,
    }
}

/// Service exceptions arrive with a 200 status and a `.QName` marker.
pub fn exception_failure(body: &Value) -> Option<SoaError> {
    let qualified_name = body.get(EXCEPTION_KEY)?.as_str()?;
    if !qualified_name.contains("Exception") {
        return None;
    }
    let message = exception_message(body).unwrap_or_else(|| qualified_name.to_string());
    let failure = if qualified_name.contains("InvalidCredentials") {
        SoaError::auth_session(message)
    } else {
        SoaError::api_response(message)
    };
    Some(failure.with_context("exception", qualified_name).with_response(body.clone()))
}

fn exception_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}

/// `JSESSIONID` value from the response's `Set-Cookie` headers.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
