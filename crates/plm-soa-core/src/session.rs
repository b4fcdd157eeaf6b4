//! Session store port and the login/logout glue around it
//!
//! Login and logout are the only commands with side effects beyond the
//! remote call: a successful login records the session in the store and on
//! the transport, and logout clears both no matter what the server said.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::sync::RwLock;

use crate::{
    error_codes::{ErrorCode, ErrorDetail},
    model::{Credentials, Session},
    operations::{session_ops, Command},
    response::CommandResult,
    transport::SoaTransport,
};

/// Where the current session lives between calls.
pub trait SessionStore: Send + Sync {
    fn store(&self, session: &Session);

    fn clear(&self);

    fn current(&self) -> Option<Session>;
}

/// Process-lifetime store.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn store(&self, session: &Session) {
        match self.session.write() {
            Ok(mut slot) => {
                *slot = Some(session.clone());
                tracing::debug!(session_id = %session.session_id, "Session stored");
            }
            Err(e) => tracing::warn!("Session store lock poisoned, session not stored: {e}"),
        }
    }

    fn clear(&self) {
        match self.session.write() {
            Ok(mut slot) => {
                *slot = None;
                tracing::debug!("Session cleared");
            }
            Err(e) => tracing::warn!("Session store lock poisoned, session not cleared: {e}"),
        }
    }

    fn current(&self) -> Option<Session> {
        self.session.read().ok().and_then(|slot| slot.clone())
    }
}

/// Authenticate and record the resulting session.
///
/// The session id comes from the response body when present, otherwise from
/// the identifier the transport captured during the call (a session cookie).
/// A session id the transport held before the call is never reused.
pub async fn login(
    transport: Option<&dyn SoaTransport>,
    store: &dyn SessionStore,
    credentials: Credentials,
) -> CommandResult<Session> {
    let previous = transport.and_then(|transport| transport.session_id());
    if let Some(transport) = transport {
        transport.set_session_id(None);
    }

    let command = Command::new(session_ops::login(), transport, false, credentials);
    let request_id = command.request_id();
    let mut session = match command.execute().await {
        Ok(session) => session,
        Err(error) => {
            restore_session_id(transport, previous);
            return Err(error);
        }
    };

    if session.session_id.is_empty() {
        session.session_id = transport
            .and_then(|transport| transport.session_id())
            .unwrap_or_default();
    }
    if session.session_id.is_empty() {
        restore_session_id(transport, previous);
        tracing::error!(request_id = %request_id, "Login succeeded without a session identifier");
        return Err(ErrorDetail::error(
            ErrorCode::LoginError,
            "Login response did not include a session identifier",
        ));
    }

    store.store(&session);
    if let Some(transport) = transport {
        transport.set_session_id(Some(session.session_id.clone()));
    }
    tracing::info!(request_id = %request_id, "Logged in");
    Ok(session)
}

/// Put back the identifier a failed login displaced.
fn restore_session_id(transport: Option<&dyn SoaTransport>, previous: Option<String>) {
    if let Some(transport) = transport {
        transport.set_session_id(previous);
    }
}

/// End the session.
///
/// Local state is cleared even when the remote call fails; the failure is
/// still reported as `LOGOUT_ERROR`.
pub async fn logout(
    transport: Option<&dyn SoaTransport>,
    store: &dyn SessionStore,
    logged_in: bool,
) -> CommandResult<()> {
    if !logged_in {
        tracing::debug!("Logout skipped, no active session");
        return Ok(());
    }

    let result = Command::new(session_ops::logout(), transport, logged_in, ())
        .execute()
        .await;

    store.clear();
    if let Some(transport) = transport {
        transport.set_session_id(None);
    }

    if let Err(error) = &result {
        tracing::warn!("Remote logout failed, local session cleared anyway: {}", error.message);
    }
    result
}
