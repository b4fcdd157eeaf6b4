//! Transport port
//!
//! The command layer never speaks HTTP itself. It hands a service name, an
//! operation name and a JSON payload to a [`SoaTransport`] and gets a JSON
//! value (or a failure) back. Implementations own session-token attachment
//! and wire-level error classification.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only settings a transport exposes to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportSettings {
    pub endpoint: String,
    pub mock_mode: bool,
}

/// Boundary to the remote SOA server.
///
/// Failures may be anything. Implementations should return a
/// [`SoaError`](crate::SoaError) inside the `anyhow::Error` when they can
/// classify the failure, so commands can pick a precise error code and
/// recover nested server messages.
#[async_trait::async_trait]
pub trait SoaTransport: Send + Sync {
    /// Invoke `service.operation` with `payload`.
    async fn call(&self, service: &str, operation: &str, payload: Value) -> anyhow::Result<Value>;

    /// Session identifier attached to outgoing calls, if any.
    fn session_id(&self) -> Option<String>;

    /// Replace (or clear) the session identifier.
    fn set_session_id(&self, session_id: Option<String>);

    fn settings(&self) -> &TransportSettings;
}
