//! Uniform command result and its wire envelope
//!
//! Commands return [`CommandResult<T>`]. When the result has to leave the
//! process (CLI output, an HTTP gateway in front of the facade) it is wrapped
//! in a [`ResponseEnvelope`]:
//!
//! ```json
//! { "data": { "id": "QWERTY", "type": "ItemRevision", ... } }
//! ```
//!
//! ```json
//! { "error": { "code": "NO_SESSION", "level": "ERROR", "message": "User is not logged in" } }
//! ```
//!
//! An envelope never carries both sides.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use serde::{Deserialize, Serialize};

use crate::error_codes::ErrorDetail;

/// Result of executing one command.
pub type CommandResult<T> = std::result::Result<T, ErrorDetail>;

/// Serializable `{ data?, error? }` form of a [`CommandResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl<T> ResponseEnvelope<T> {
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub const fn failure(error: ErrorDetail) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl ResponseEnvelope<()> {
    /// Success without a payload, serialized as `{}`.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }
}

impl<T> From<CommandResult<T>> for ResponseEnvelope<T> {
    fn from(result: CommandResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error),
        }
    }
}
