//! Core types and operations for the LMS outcomes API.
//!
//! This crate has no HTTP dependencies. Transport lives
//! behind the [`Requester`](requester::Requester) trait; `rubric-http`
//! provides the `reqwest` implementation and tests use
//! [`MockRequester`](mock::MockRequester).

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod attributes;
pub mod client;
pub mod error;
pub mod group;
pub mod link;
pub mod outcome;
pub mod pagination;
pub mod requester;
pub mod scope;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use attributes::{Merge, Nullable, Resource};
pub use client::OutcomesClient;
pub use error::{Error, Result};
pub use group::{GroupFields, GroupRef, OutcomeGroup};
pub use link::{LinkFilter, OutcomeLink, OutcomeStyle};
pub use outcome::{CalculationMethod, Outcome, OutcomeFields, OutcomeId, Rating};
pub use pagination::PaginatedList;
pub use requester::{ApiRequest, ApiResponse, Endpoint, Method, Params, Requester};
pub use scope::{ContextScope, ScopeError};
