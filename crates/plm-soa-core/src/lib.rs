//! # PLM SOA Core
//!
//! Command layer for PLM SOA calls - strictly functional Rust with zero unwraps.
//!
//! Each remote operation is an [`Operation`] descriptor executed by the
//! generic [`Command`]: session preamble, input validation, payload
//! construction, one transport call, response normalization and failure
//! classification. Callers always get a [`CommandResult`], never a panic or
//! a raw transport error.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Error Handling
//!
//! Two layers:
//! - [`SoaError`] is the internal classified failure, tagged with an
//!   [`ErrorCategory`]
//! - [`ErrorDetail`] is what callers see: `{ code, level, message }`
//!
//! The executor converts the first into the second at the command boundary.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod config;
mod error;
mod error_codes;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod operations;
mod response;
pub mod session;
pub mod transport;

pub use config::{ClientConfig, ConfigError, CredentialsConfig, SearchConfig, SearchConvention};
pub use error::{
    api_response_error, auth_session_error, classify, extract_server_message, failure_message,
    network_error, parsing_error, partial_errors, ErrorCategory, SoaError,
};
pub use error_codes::{ErrorCode, ErrorDetail, ErrorLevel};
pub use model::{
    Credentials, DomainObject, Session, SessionInfo, TypeDescription, UpdatedItem, UserInfo,
};
pub use operations::{Command, Operation};
pub use response::{CommandResult, ResponseEnvelope};
pub use session::{InMemorySessionStore, SessionStore};
pub use transport::{SoaTransport, TransportSettings};
