//! The `Requester` trait and the request/response envelopes it exchanges.
//!
//! The trait is implemented by transports (e.g. `rubric-http`). The
//! [`OutcomesClient`](crate::client::OutcomesClient) and
//! [`PaginatedList`](crate::pagination::PaginatedList) depend on this
//! abstraction, not on any concrete HTTP stack.

use std::{fmt, future::Future};

use serde_json::{Map, Value};

/// Request parameters: query pairs for reads, the JSON body for writes.
pub type Params = Map<String, Value>;

// ─── Request ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
  Get,
  Put,
  Post,
  Delete,
}

impl Method {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Put => "PUT",
      Self::Post => "POST",
      Self::Delete => "DELETE",
    }
  }

  /// Whether parameters travel in the request body rather than the query.
  pub fn has_body(&self) -> bool { matches!(self, Self::Put | Self::Post) }
}

impl fmt::Display for Method {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Where a request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
  /// Relative to the API root, e.g. `global/outcome_groups/5`.
  Path(String),
  /// A fully-qualified URL handed back by the server (next-page links).
  Absolute(String),
}

impl fmt::Display for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Path(p) => f.write_str(p),
      Self::Absolute(u) => f.write_str(u),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method:   Method,
  pub endpoint: Endpoint,
  pub params:   Params,
}

impl ApiRequest {
  pub fn new(method: Method, path: impl Into<String>) -> Self {
    Self {
      method,
      endpoint: Endpoint::Path(path.into()),
      params: Params::new(),
    }
  }

  pub fn get(path: impl Into<String>) -> Self { Self::new(Method::Get, path) }

  pub fn put(path: impl Into<String>) -> Self { Self::new(Method::Put, path) }

  pub fn post(path: impl Into<String>) -> Self { Self::new(Method::Post, path) }

  pub fn delete(path: impl Into<String>) -> Self {
    Self::new(Method::Delete, path)
  }

  /// Follow a server-provided URL verbatim.
  pub fn absolute(method: Method, url: impl Into<String>) -> Self {
    Self {
      method,
      endpoint: Endpoint::Absolute(url.into()),
      params: Params::new(),
    }
  }

  pub fn with_params(mut self, params: Params) -> Self {
    self.params.extend(params);
    self
  }

  pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.params.insert(key.into(), value.into());
    self
  }
}

// ─── Response ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
  /// Parsed JSON body; `Value::Null` for an empty body.
  pub body: Value,
  /// The `rel="next"` page URL, if the server sent one.
  pub next: Option<String>,
}

impl ApiResponse {
  pub fn new(body: Value) -> Self { Self { body, next: None } }

  pub fn with_next(mut self, next: impl Into<String>) -> Self {
    self.next = Some(next.into());
    self
  }

  /// Whether the body is a JSON object containing `key`, even with a `null`
  /// value.
  pub fn has_key(&self, key: &str) -> bool {
    self
      .body
      .as_object()
      .is_some_and(|obj| obj.contains_key(key))
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the transport that talks to the LMS API.
///
/// An implementation performs exactly one round trip per call, attaches
/// credentials, and reports any transport failure, non-success status, or
/// unparseable body through `Self::Error`. It does not retry.
pub trait Requester: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn request(
    &self,
    request: ApiRequest,
  ) -> impl Future<Output = Result<ApiResponse, Self::Error>> + Send + '_;
}
