//! Login, logout, favorites and session info

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)]

mod common;

use common::{MockTransport, RecordingSessionStore};
use plm_soa_core::{
    operations::{session_ops, Command},
    session::{login, logout},
    Credentials, ErrorCode, SessionStore, SoaError, SoaTransport,
};
use serde_json::json;

#[tokio::test]
async fn test_login_stores_session() {
    let transport = MockTransport::responding(json!({
        "sessionId": "S-100",
        "serverInfo": { "Version": "V14" }
    }));
    let store = RecordingSessionStore::new();

    let session = login(Some(&transport), &store, Credentials::new("infodba", "pw"))
        .await
        .expect("login should succeed");

    assert_eq!(session.session_id, "S-100");
    assert_eq!(store.current().map(|s| s.session_id), Some("S-100".to_string()));
    assert_eq!(transport.session_id(), Some("S-100".to_string()));

    let call = &transport.calls()[0];
    assert_eq!(call.service, "Core-2006-03-Session");
    assert_eq!(call.operation, "login");
    assert_eq!(call.payload["credentials"]["user"], json!("infodba"));
}

#[tokio::test]
async fn test_login_falls_back_to_cookie_session() {
    let transport = MockTransport::responding(json!({ "serverInfo": {} })).with_cookie("JSESSION-1");
    let store = RecordingSessionStore::new();

    let session = login(Some(&transport), &store, Credentials::new("infodba", "pw"))
        .await
        .expect("login should succeed");
    assert_eq!(session.session_id, "JSESSION-1");
}

#[tokio::test]
async fn test_login_without_any_session_id_fails() {
    let transport = MockTransport::responding(json!({}));
    let store = RecordingSessionStore::new();

    let error = login(Some(&transport), &store, Credentials::new("infodba", "pw"))
        .await
        .err()
        .expect("login should fail");
    assert_eq!(error.code, ErrorCode::LoginError);
    assert!(store.current().is_none());
}

#[tokio::test]
async fn test_login_never_reuses_a_previous_session_id() {
    let transport = MockTransport::responding(json!({ "serverInfo": {} }));
    transport.set_session_id(Some("OLD-EXPIRED".to_string()));
    let store = RecordingSessionStore::with_session("OLD-EXPIRED");

    let error = login(Some(&transport), &store, Credentials::new("infodba", "pw"))
        .await
        .err()
        .expect("login without a fresh session id should fail");
    assert_eq!(error.code, ErrorCode::LoginError);
    assert_eq!(transport.session_id(), Some("OLD-EXPIRED".to_string()));
    assert_eq!(store.current().map(|s| s.session_id), Some("OLD-EXPIRED".to_string()));
}

#[tokio::test]
async fn test_login_replaces_previous_session_with_fresh_cookie() {
    let transport = MockTransport::responding(json!({ "serverInfo": {} })).with_cookie("JSESSION-NEW");
    transport.set_session_id(Some("OLD".to_string()));
    let store = RecordingSessionStore::with_session("OLD");

    let session = login(Some(&transport), &store, Credentials::new("infodba", "pw"))
        .await
        .expect("login should succeed");
    assert_eq!(session.session_id, "JSESSION-NEW");
    assert_eq!(store.current().map(|s| s.session_id), Some("JSESSION-NEW".to_string()));
}

#[tokio::test]
async fn test_failed_login_keeps_previous_transport_session() {
    let transport = MockTransport::failing(SoaError::auth_session("Invalid user ID or password").into());
    transport.set_session_id(Some("S-OLD".to_string()));
    let store = RecordingSessionStore::new();

    let error = login(Some(&transport), &store, Credentials::new("infodba", "bad"))
        .await
        .err()
        .expect("login should fail");
    assert_eq!(error.code, ErrorCode::InvalidCredentials);
    assert_eq!(transport.session_id(), Some("S-OLD".to_string()));
}

#[tokio::test]
async fn test_login_failure_codes() {
    let cases = [
        (SoaError::auth_session("Invalid user ID or password"), ErrorCode::InvalidCredentials),
        (SoaError::network("connection refused"), ErrorCode::NetworkError),
        (SoaError::timeout("timed out"), ErrorCode::Timeout),
        (SoaError::api_response("HTTP 500"), ErrorCode::LoginError),
        (SoaError::parsing("bad json"), ErrorCode::LoginError),
    ];

    for (failure, expected) in cases {
        let message = failure.message().to_string();
        let transport = MockTransport::failing(failure.into());
        let store = RecordingSessionStore::new();
        let error = login(Some(&transport), &store, Credentials::new("infodba", "pw"))
            .await
            .err()
            .expect("login should fail");
        assert_eq!(error.code, expected);
        assert_eq!(error.message, message);
        assert!(store.current().is_none());
    }
}

#[tokio::test]
async fn test_login_rejects_blank_credentials() {
    let transport = MockTransport::new();
    let store = RecordingSessionStore::new();
    let error = login(Some(&transport), &store, Credentials::new("infodba", ""))
        .await
        .err()
        .expect("login should fail");
    assert_eq!(error.code, ErrorCode::InvalidParameter);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_logout_when_not_logged_in_is_noop() {
    let transport = MockTransport::new();
    let store = RecordingSessionStore::new();

    let result = logout(Some(&transport), &store, false).await;
    assert_eq!(result, Ok(()));
    assert_eq!(transport.call_count(), 0);
    assert_eq!(store.clear_count(), 0);
}

#[tokio::test]
async fn test_logout_success_clears_state() {
    let transport = MockTransport::new();
    transport.set_session_id(Some("S1".to_string()));
    let store = RecordingSessionStore::with_session("S1");

    assert_eq!(logout(Some(&transport), &store, true).await, Ok(()));
    assert_eq!(transport.call_count(), 1);
    assert!(store.current().is_none());
    assert_eq!(transport.session_id(), None);
}

#[tokio::test]
async fn test_logout_failure_still_clears_state() {
    let transport = MockTransport::failing(anyhow::anyhow!("server went away"));
    transport.set_session_id(Some("S1".to_string()));
    let store = RecordingSessionStore::with_session("S1");

    let error = logout(Some(&transport), &store, true)
        .await
        .err()
        .expect("logout should fail");
    assert_eq!(error.code, ErrorCode::LogoutError);
    assert_eq!(error.message, "server went away");
    assert_eq!(store.clear_count(), 1);
    assert!(store.current().is_none());
    assert_eq!(transport.session_id(), None);
}

#[tokio::test]
async fn test_logout_without_transport_clears_store() {
    let store = RecordingSessionStore::with_session("S1");
    let error = logout(None, &store, true).await.err().expect("logout should fail");
    assert!(error.message.contains("SOA client is not initialized"));
    assert_eq!(store.clear_count(), 1);
}

#[tokio::test]
async fn test_favorites_normalized() {
    let transport = MockTransport::responding(json!({
        "favorites": { "objects": [
            { "uid": "F1", "type": "Folder", "props": { "object_name": ["Home"] } }
        ] }
    }));
    let favorites = Command::new(session_ops::favorites(), Some(&transport), true, ())
        .execute()
        .await
        .expect("favorites should load");
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].name, "Home");
}

#[tokio::test]
async fn test_favorites_failure_code() {
    let transport = MockTransport::failing(anyhow::anyhow!("boom"));
    let error = Command::new(session_ops::favorites(), Some(&transport), true, ())
        .execute()
        .await
        .err()
        .expect("favorites should fail");
    assert_eq!(error.code, ErrorCode::FavoritesError);
}

#[tokio::test]
async fn test_session_info_normalized() {
    let transport = MockTransport::responding(json!({
        "user": { "uid": "USR1" },
        "group": { "uid": "GRP1" },
        "role": { "uid": "ROL1" },
        "serverVersion": "V14000.2",
        "extraInfo": { "hostName": "plm01" }
    }));
    let info = Command::new(session_ops::session_info(), Some(&transport), true, ())
        .execute()
        .await
        .expect("session info should load");
    assert_eq!(info.user.as_deref(), Some("USR1"));
    assert_eq!(info.role.as_deref(), Some("ROL1"));
    assert_eq!(info.server_version.as_deref(), Some("V14000.2"));
    assert_eq!(info.extra.get("hostName"), Some(&json!("plm01")));
}
