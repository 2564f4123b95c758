//! Error types for `rubric-core`.

use thiserror::Error;

use crate::scope::{ContextScope, ScopeError};

#[derive(Debug, Error)]
pub enum Error {
  /// The requester failed: transport error, non-2xx status, unreadable body.
  #[error("request failed: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("could not decode response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("invalid outcome group context: {0}")]
  Scope(#[from] ScopeError),

  #[error("title must not be empty")]
  EmptyTitle,

  #[error("expected a JSON array page, got: {0}")]
  UnexpectedPage(String),

  #[error("{operation} is not available for the {scope} scope")]
  UnsupportedScope {
    operation: &'static str,
    scope:     ContextScope,
  },
}

impl Error {
  /// Wrap a requester error, keeping it reachable through `source()`.
  pub fn transport<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Transport(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
