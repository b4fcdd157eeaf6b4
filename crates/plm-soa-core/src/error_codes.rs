//! Wire-facing error codes
//!
//! Every failed command surfaces exactly one [`ErrorDetail`]: a stable
//! `SCREAMING_SNAKE_CASE` code, a severity level and a human-readable message.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Machine-readable error codes returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ═══════════════════════════════════════════════════════════════════════
    // Preconditions
    // ═══════════════════════════════════════════════════════════════════════
    /// Operation needs an active session
    NoSession,
    /// Caller input failed validation
    InvalidParameter,

    // ═══════════════════════════════════════════════════════════════════════
    // Operation failures
    // ═══════════════════════════════════════════════════════════════════════
    /// Search call failed
    SearchError,
    /// Item creation failed
    CreateError,
    /// Property update failed
    UpdateError,
    /// Generic server call failure (load, type descriptions)
    ApiError,
    /// Logout failed remotely
    LogoutError,
    /// Favorites lookup failed
    FavoritesError,
    /// Session info lookup failed
    SessionInfoError,

    // ═══════════════════════════════════════════════════════════════════════
    // Login refinements
    // ═══════════════════════════════════════════════════════════════════════
    /// Login failed for an unclassified reason
    LoginError,
    /// Server rejected the credentials
    InvalidCredentials,
    /// Server unreachable during login
    NetworkError,
    /// Login timed out
    Timeout,
}

impl ErrorCode {
    /// Get the string representation of the error code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoSession => "NO_SESSION",
            Self::InvalidParameter => "INVALID_PARAMETER",
            Self::SearchError => "SEARCH_ERROR",
            Self::CreateError => "CREATE_ERROR",
            Self::UpdateError => "UPDATE_ERROR",
            Self::ApiError => "API_ERROR",
            Self::LogoutError => "LOGOUT_ERROR",
            Self::FavoritesError => "FAVORITES_ERROR",
            Self::SessionInfoError => "SESSION_INFO_ERROR",
            Self::LoginError => "LOGIN_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NetworkError => "NETWORK_ERROR",
            Self::Timeout => "TIMEOUT",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity attached to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorLevel {
    Info,
    Warning,
    Error,
}

/// Public error shape: `{ code, level, message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub level: ErrorLevel,
    pub message: String,
}

impl ErrorDetail {
    #[must_use]
    pub fn new(code: ErrorCode, level: ErrorLevel, message: impl Into<String>) -> Self {
        Self {
            code,
            level,
            message: message.into(),
        }
    }

    /// ERROR-level detail, the level every command failure uses.
    #[must_use]
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code, ErrorLevel::Error, message)
    }

    #[must_use]
    pub fn no_session() -> Self {
        Self::error(ErrorCode::NoSession, "User is not logged in")
    }

    #[must_use]
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::error(ErrorCode::InvalidParameter, message)
    }
}
