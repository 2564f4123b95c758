//! A scripted in-memory [`Requester`] for tests.
//!
//! Responses are queued up front and handed out in order; every request the
//! client issues is recorded so tests can assert on verbs, paths and bodies.

use std::{
  collections::VecDeque,
  sync::{Mutex, MutexGuard, PoisonError},
};

use serde_json::Value;
use thiserror::Error;

use crate::requester::{ApiRequest, ApiResponse, Requester};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockError {
  #[error("no scripted response left for {0}")]
  Exhausted(String),

  #[error("scripted failure: {0}")]
  Scripted(String),
}

#[derive(Debug, Default)]
pub struct MockRequester {
  responses: Mutex<VecDeque<Result<ApiResponse, MockError>>>,
  requests:  Mutex<Vec<ApiRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockRequester {
  pub fn new() -> Self { Self::default() }

  /// Queue a single-page response.
  pub fn respond(&self, body: Value) -> &Self {
    lock(&self.responses).push_back(Ok(ApiResponse::new(body)));
    self
  }

  /// Queue a page that links to `next`.
  pub fn respond_page(&self, body: Value, next: &str) -> &Self {
    lock(&self.responses).push_back(Ok(ApiResponse::new(body).with_next(next)));
    self
  }

  /// Queue a transport failure.
  pub fn fail(&self, message: &str) -> &Self {
    lock(&self.responses).push_back(Err(MockError::Scripted(message.to_string())));
    self
  }

  /// Every request issued so far, oldest first.
  pub fn requests(&self) -> Vec<ApiRequest> { lock(&self.requests).clone() }

  pub fn last_request(&self) -> Option<ApiRequest> {
    lock(&self.requests).last().cloned()
  }

  pub fn request_count(&self) -> usize { lock(&self.requests).len() }
}

impl Requester for MockRequester {
  type Error = MockError;

  async fn request(&self, request: ApiRequest) -> Result<ApiResponse, MockError> {
    let label = format!("{} {}", request.method, request.endpoint);
    lock(&self.requests).push(request);
    lock(&self.responses)
      .pop_front()
      .unwrap_or(Err(MockError::Exhausted(label)))
  }
}
