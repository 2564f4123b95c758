//! HTTP transport for the LMS outcomes API.
//!
//! Wraps [`reqwest`] behind [`rubric_core::Requester`] so the core client never
//! sees HTTP details: authentication, parameter encoding, status handling and
//! `Link` header pagination all live here.

mod link_header;
mod query;
mod requester;

pub mod error;

pub use error::{Error, Result};
pub use requester::{HttpConfig, HttpRequester};
