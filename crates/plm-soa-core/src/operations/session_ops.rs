//! Session service operations: login, logout, favorites, session info
//!
//! Login and logout descriptors are driven by [`crate::session`], which adds
//! the store bookkeeping around them.

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

use super::{empty_payload, no_validation, payload::require_non_empty, services, Operation};
use crate::{
    error::{partial_errors, ErrorCategory, SoaError},
    error_codes::ErrorCode,
    model::{Credentials, DomainObject, Session, SessionInfo},
    normalize::{normalize_object, normalize_session_info, normalize_user},
};

/// Login failures are reported with the most specific code available.
pub const fn login_code(category: ErrorCategory) -> Option<ErrorCode> {
    match category {
        ErrorCategory::AuthSession => Some(ErrorCode::InvalidCredentials),
        ErrorCategory::Network => Some(ErrorCode::NetworkError),
        ErrorCategory::ApiTimeout => Some(ErrorCode::Timeout),
        _ => None,
    }
}

pub fn login() -> Operation<Credentials, Session> {
    Operation {
        name: "login",
        service: services::SESSION,
        operation: services::LOGIN,
        requires_session: false,
        error_code: ErrorCode::LoginError,
        refine_code: Some(login_code),
        validate: validate_credentials,
        build_payload: |credentials, _| json!({ "credentials": credentials }),
        map_response: login_session,
    }
}

fn validate_credentials(credentials: &Credentials) -> Result<(), String> {
    require_non_empty(&credentials.user, "User")?;
    require_non_empty(&credentials.password, "Password")
}

/// Session from a login body. An empty id means the server only set a
/// cookie; the caller falls back to the transport's captured id.
fn login_session(body: Value, _credentials: &Credentials) -> Result<Session, SoaError> {
    partial_errors(&body).map_or(Ok(()), Err)?;
    let session_id = body
        .get("sessionId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(Session {
        session_id,
        user: body.get("user").and_then(normalize_user),
        expires_at: session_expiry(&body, Utc::now()),
        server_info: body.get("serverInfo").cloned(),
    })
}

/// Expiry carried by a login body.
///
/// An absolute `expiresAt` timestamp (RFC 3339) wins; otherwise a
/// `sessionTimeout` in seconds, top-level or inside `serverInfo`, counts
/// from `now`. Servers that send neither leave the session open-ended.
fn session_expiry(body: &Value, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let absolute = body
        .get("expiresAt")
        .and_then(Value::as_str)
        .and_then(|stamp| DateTime::parse_from_rfc3339(stamp).ok())
        .map(|stamp| stamp.with_timezone(&Utc));

    absolute.or_else(|| {
        let timeout = body
            .get("sessionTimeout")
            .or_else(|| body.pointer("/serverInfo/SessionTimeout"))?;
        let seconds = timeout
            .as_i64()
            .or_else(|| timeout.as_str().and_then(|text| text.trim().parse().ok()))
            .filter(|seconds| *seconds > 0)?;
        now.checked_add_signed(Duration::try_seconds(seconds)?)
    })
}

pub fn logout() -> Operation<(), ()> {
    Operation {
        name: "logout",
        service: services::SESSION,
        operation: services::LOGOUT,
        requires_session: false,
        error_code: ErrorCode::LogoutError,
        refine_code: None,
        validate: no_validation,
        build_payload: empty_payload,
        map_response: |_, _| Ok(()),
    }
}

pub fn favorites() -> Operation<(), Vec<DomainObject>> {
    Operation {
        name: "get_favorites",
        service: services::SESSION,
        operation: services::GET_FAVORITES,
        requires_session: true,
        error_code: ErrorCode::FavoritesError,
        refine_code: None,
        validate: no_validation,
        build_payload: empty_payload,
        map_response: favorite_objects,
    }
}

/// Favorites arrive as a list under `favorites` (possibly wrapped as
/// `favorites.objects`) or under `objects`.
fn favorite_objects(body: Value, _params: &()) -> Result<Vec<DomainObject>, SoaError> {
    partial_errors(&body).map_or(Ok(()), Err)?;
    let list = body
        .get("favorites")
        .and_then(|favorites| favorites.as_array().or_else(|| favorites.get("objects")?.as_array()))
        .or_else(|| body.get("objects").and_then(Value::as_array));
    Ok(list
        .map(|objects| objects.iter().map(normalize_object).collect())
        .unwrap_or_default())
}

pub fn session_info() -> Operation<(), SessionInfo> {
    Operation {
        name: "get_session_info",
        service: services::SESSION,
        operation: services::GET_SESSION_INFO,
        requires_session: true,
        error_code: ErrorCode::SessionInfoError,
        refine_code: None,
        validate: no_validation,
        build_payload: empty_payload,
        map_response: |body, _| Ok(normalize_session_info(&body)),
    }
}
