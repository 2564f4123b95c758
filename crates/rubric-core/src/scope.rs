//! Context scope — which namespace an outcome group lives in.
//!
//! Every outcome group belongs to exactly one of a course, an account, or the
//! global namespace. The scope is resolved once, when the group is decoded,
//! and decides the path prefix of every request made on its behalf.

use std::fmt;

use thiserror::Error;

/// The namespace an outcome group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextScope {
  Course(u64),
  Account(u64),
  Global,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
  #[error("unrecognised context_type {0:?}")]
  Unrecognised(String),

  #[error("context_type {0:?} requires a context_id")]
  MissingContextId(String),
}

impl ContextScope {
  /// Resolve a scope from the `context_type` / `context_id` pair the API
  /// reports. An absent `context_type` is the global namespace; anything other
  /// than `"Course"` or `"Account"` is rejected.
  pub fn resolve(
    context_type: Option<&str>,
    context_id: Option<u64>,
  ) -> Result<Self, ScopeError> {
    match (context_type, context_id) {
      (None, _) => Ok(Self::Global),
      (Some("Course"), Some(id)) => Ok(Self::Course(id)),
      (Some("Account"), Some(id)) => Ok(Self::Account(id)),
      (Some(kind @ ("Course" | "Account")), None) => {
        Err(ScopeError::MissingContextId(kind.to_string()))
      }
      (Some(other), _) => Err(ScopeError::Unrecognised(other.to_string())),
    }
  }

  /// The request path prefix: `courses/{id}`, `accounts/{id}` or `global`.
  pub fn path_prefix(&self) -> String {
    match self {
      Self::Course(id) => format!("courses/{id}"),
      Self::Account(id) => format!("accounts/{id}"),
      Self::Global => "global".to_string(),
    }
  }

  /// The `context_type` string the API uses for this scope.
  pub fn context_type(&self) -> Option<&'static str> {
    match self {
      Self::Course(_) => Some("Course"),
      Self::Account(_) => Some("Account"),
      Self::Global => None,
    }
  }

  pub fn is_global(&self) -> bool { matches!(self, Self::Global) }
}

impl fmt::Display for ContextScope {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.path_prefix())
  }
}
