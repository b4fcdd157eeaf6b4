//! # PLM SOA
//!
//! Outer layer of the PLM SOA client:
//! - [`http::HttpTransport`]: the reqwest implementation of the transport port
//! - [`store::FileSessionStore`]: a session store that survives restarts
//! - [`service::PlmService`]: the facade integrations call
//! - [`cli`]: the `plm-soa` command-line tool
//!
//! The command layer itself lives in `plm_soa_core`.

pub mod cli;
pub mod http;
pub mod service;
pub mod store;

pub use http::HttpTransport;
pub use service::PlmService;
pub use store::FileSessionStore;
