//! Classified failures for SOA calls.
//!
//! Every failure that crosses the transport boundary is folded into a
//! [`SoaError`] tagged with one [`ErrorCategory`]. The category never reaches
//! the wire directly; commands use it to pick a wire-facing
//! [`ErrorCode`](crate::ErrorCode).
//!
//! The classifier functions ([`api_response_error`], [`network_error`],
//! [`auth_session_error`], [`parsing_error`]) accept any `anyhow::Error` and
//! return the original `SoaError` untouched when the failure is already
//! classified.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of failure categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// The server answered with an error payload
    ApiResponse,
    /// A response could not be interpreted
    DataParsing,
    /// Credentials were rejected or the session expired
    AuthSession,
    /// The server could not be reached
    Network,
    /// The server did not answer in time
    ApiTimeout,
    /// Input rejected before or by the server
    DataValidation,
    /// Anything else
    Unknown,
}

/// Internal classified failure.
///
/// Carries the raw server body (when one was received) so the most specific
/// server message can be recovered later with [`SoaError::server_message`].
#[derive(Debug, Clone)]
pub struct SoaError {
    message: String,
    category: ErrorCategory,
    cause: Option<Arc<anyhow::Error>>,
    context: BTreeMap<String, String>,
    response: Option<Value>,
}

impl SoaError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category,
            cause: None,
            context: BTreeMap::new(),
            response: None,
        }
    }

    pub fn api_response(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::ApiResponse, message)
    }

    pub fn parsing(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::DataParsing, message)
    }

    pub fn auth_session(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::AuthSession, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::ApiTimeout, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::DataValidation, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unknown, message)
    }

    /// Attach the underlying failure.
    #[must_use]
    pub fn with_cause(mut self, cause: anyhow::Error) -> Self {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Attach a diagnostic key/value pair.
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attach the raw server body that accompanied the failure.
    #[must_use]
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn category(&self) -> ErrorCategory {
        self.category
    }

    pub const fn context(&self) -> &BTreeMap<String, String> {
        &self.context
    }

    pub const fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }

    /// Most specific message available: the first server partial error when
    /// the attached body carries one, otherwise this failure's own message.
    pub fn server_message(&self) -> String {
        self.response
            .as_ref()
            .and_then(extract_server_message)
            .unwrap_or_else(|| self.message.clone())
    }
}

impl fmt::Display for SoaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SoaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| &**cause as &(dyn std::error::Error + 'static))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CLASSIFIERS
// ═══════════════════════════════════════════════════════════════════════════

/// Wrap `err` into `category` unless it already is a [`SoaError`].
pub fn classify(err: anyhow::Error, category: ErrorCategory) -> SoaError {
    match err.downcast::<SoaError>() {
        Ok(classified) => classified,
        Err(other) => SoaError::new(category, other.to_string()).with_cause(other),
    }
}

pub fn api_response_error(err: anyhow::Error) -> SoaError {
    classify(err, ErrorCategory::ApiResponse)
}

pub fn network_error(err: anyhow::Error) -> SoaError {
    classify(err, ErrorCategory::Network)
}

pub fn auth_session_error(err: anyhow::Error) -> SoaError {
    classify(err, ErrorCategory::AuthSession)
}

pub fn parsing_error(err: anyhow::Error) -> SoaError {
    classify(err, ErrorCategory::DataParsing)
}

// ═══════════════════════════════════════════════════════════════════════════
// SERVER MESSAGE EXTRACTION
// ═══════════════════════════════════════════════════════════════════════════

const PARTIAL_ERROR_PATHS: [&str; 2] = [
    "/ServiceData/partialErrors/0/errorValues/0/message",
    "/data/ServiceData/partialErrors/0/errorValues/0/message",
];

/// Pull the first partial-error message out of a server body.
///
/// The text is returned exactly as the server sent it. An empty string
/// carries nothing to report and counts as absent.
/// Total: any shape mismatch yields `None`, never a panic.
pub fn extract_server_message(body: &Value) -> Option<String> {
    PARTIAL_ERROR_PATHS
        .iter()
        .filter_map(|path| body.pointer(path))
        .find_map(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(ToString::to_string)
}

/// Message a command reports for a failed invocation.
///
/// Classified failures prefer the nested server message; anything else
/// reports its own top-level message.
pub fn failure_message(err: &anyhow::Error) -> String {
    err.downcast_ref::<SoaError>()
        .map_or_else(|| err.to_string(), SoaError::server_message)
}

/// Turn partial errors inside an otherwise successful body into a failure.
pub fn partial_errors(body: &Value) -> Option<SoaError> {
    extract_server_message(body)
        .map(|message| SoaError::api_response(message).with_response(body.clone()))
}
