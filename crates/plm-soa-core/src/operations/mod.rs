//! Operations as data
//!
//! Every remote call the client makes is described by one [`Operation`]
//! value: where it goes, whether it needs a session, how its parameters are
//! checked, how its payload is built and how the answer is read back. A
//! single generic [`Command`] drives any descriptor through the same
//! preamble, invocation and failure classification.
//!
//! Descriptors are plain values built by the constructor functions in the
//! submodules ([`search::search`], [`items::get_item`], ...).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

mod executor;
pub mod item_types;
pub mod items;
pub mod payload;
pub mod search;
pub mod session_ops;

use serde_json::Value;
use uuid::Uuid;

pub use executor::Command;

use crate::{error::ErrorCategory, error::SoaError, error_codes::ErrorCode};

/// Service and operation names understood by the server.
pub mod services {
    pub const SESSION: &str = "Core-2006-03-Session";
    pub const DATA_MANAGEMENT: &str = "Core-2008-06-DataManagement";
    pub const SAVED_QUERY: &str = "Query-2012-10-SavedQuery";
    pub const FINDER: &str = "Query-2012-10-Finder";

    pub const LOGIN: &str = "login";
    pub const LOGOUT: &str = "logout";
    pub const GET_FAVORITES: &str = "getFavorites";
    pub const GET_SESSION_INFO: &str = "getTCSessionInfo";
    pub const LOAD_OBJECTS: &str = "loadObjects";
    pub const CREATE_OBJECTS: &str = "createRelateAndSubmitObjects";
    pub const SET_PROPERTIES: &str = "setProperties";
    pub const GET_TYPE_DESCRIPTIONS: &str = "getTypeDescriptions";
    pub const PERFORM_SAVED_SEARCH: &str = "performSavedSearch";
    pub const PERFORM_SEARCH: &str = "performSearch";
}

/// Checks parameters; `Err` carries the `INVALID_PARAMETER` message.
pub type Validator<P> = fn(&P) -> Result<(), String>;

/// Builds the request payload. The request id is available for fields the
/// server echoes back, such as `clientId`.
pub type PayloadBuilder<P> = fn(&P, Uuid) -> Value;

/// Reads a successful response body into the command's result.
pub type ResponseMapper<P, T> = fn(Value, &P) -> Result<T, SoaError>;

/// Descriptor for one remote operation.
pub struct Operation<P, T> {
    /// Short name used in logs
    pub name: &'static str,
    pub service: &'static str,
    pub operation: &'static str,
    pub requires_session: bool,
    /// Code reported for any failure past validation
    pub error_code: ErrorCode,
    /// Per-category refinement of `error_code`
    pub refine_code: Option<fn(ErrorCategory) -> Option<ErrorCode>>,
    pub validate: Validator<P>,
    pub build_payload: PayloadBuilder<P>,
    pub map_response: ResponseMapper<P, T>,
}

impl<P, T> Operation<P, T> {
    /// Wire code for a failure of the given category.
    pub fn code_for(&self, category: ErrorCategory) -> ErrorCode {
        self.refine_code
            .and_then(|refine| refine(category))
            .unwrap_or(self.error_code)
    }
}

impl<P, T> std::fmt::Debug for Operation<P, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .field("service", &self.service)
            .field("operation", &self.operation)
            .field("requires_session", &self.requires_session)
            .field("error_code", &self.error_code)
            .finish_non_exhaustive()
    }
}

/// Validator for operations without parameters to check.
pub const fn no_validation<P>(_params: &P) -> Result<(), String> {
    Ok(())
}

/// Payload builder for operations that send `{}`.
pub fn empty_payload<P>(_params: &P, _request_id: Uuid) -> Value {
    Value::Object(serde_json::Map::new())
}
