//! Common test utilities and relaxed clippy settings for plm-soa-core integration tests
//!
//! Provides a scripted transport that records every call and a session
//! store that counts how often it was cleared.

#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    // Test code ergonomics
    clippy::too_many_lines,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::missing_panics_doc,
)]

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use plm_soa_core::{InMemorySessionStore, Session, SessionStore, SoaTransport, TransportSettings};
use serde_json::Value;

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub service: String,
    pub operation: String,
    pub payload: Value,
}

/// Transport answering from a script of canned results.
///
/// When the script runs dry every call answers `{}`.
pub struct MockTransport {
    settings: TransportSettings,
    script: Mutex<VecDeque<anyhow::Result<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
    session_id: Mutex<Option<String>>,
    cookie_on_call: Option<String>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            settings: TransportSettings {
                endpoint: "http://mock.local/tc".to_string(),
                mock_mode: true,
            },
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            session_id: Mutex::new(None),
            cookie_on_call: None,
        }
    }

    pub fn responding(response: Value) -> Self {
        Self::new().then_ok(response)
    }

    pub fn failing(error: anyhow::Error) -> Self {
        Self::new().then_err(error)
    }

    pub fn then_ok(self, response: Value) -> Self {
        self.script.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn then_err(self, error: anyhow::Error) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Simulate a server that sets a session cookie on every call.
    pub fn with_cookie(mut self, session_id: &str) -> Self {
        self.cookie_on_call = Some(session_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_payload(&self) -> Value {
        self.calls()
            .last()
            .map(|call| call.payload.clone())
            .unwrap_or(Value::Null)
    }
}

#[async_trait::async_trait]
impl SoaTransport for MockTransport {
    async fn call(&self, service: &str, operation: &str, payload: Value) -> anyhow::Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            service: service.to_string(),
            operation: operation.to_string(),
            payload,
        });
        if let Some(cookie) = &self.cookie_on_call {
            *self.session_id.lock().unwrap() = Some(cookie.clone());
        }
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Object(serde_json::Map::new())))
    }

    fn session_id(&self) -> Option<String> {
        self.session_id.lock().unwrap().clone()
    }

    fn set_session_id(&self, session_id: Option<String>) {
        *self.session_id.lock().unwrap() = session_id;
    }

    fn settings(&self) -> &TransportSettings {
        &self.settings
    }
}

/// Session store that counts clears.
#[derive(Default)]
pub struct RecordingSessionStore {
    inner: InMemorySessionStore,
    clears: AtomicUsize,
}

impl RecordingSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session_id: &str) -> Self {
        let store = Self::default();
        store.store(&Session::new(session_id));
        store
    }

    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

impl SessionStore for RecordingSessionStore {
    fn store(&self, session: &Session) {
        self.inner.store(session);
    }

    fn clear(&self) {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear();
    }

    fn current(&self) -> Option<Session> {
        self.inner.current()
    }
}

/// Body carrying one server partial error.
pub fn partial_error_body(message: &str) -> Value {
    serde_json::json!({
        "ServiceData": {
            "partialErrors": [
                { "errorValues": [ { "code": 214000, "level": 3, "message": message } ] }
            ]
        }
    })
}
