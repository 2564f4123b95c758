//! Lazy traversal of paginated collection endpoints.
//!
//! Nothing is requested until the first call to [`PaginatedList::next`]. Each
//! later page is fetched only once the items of the previous page have all
//! been handed out, following the server's `rel="next"` link.

use std::{collections::VecDeque, sync::Arc};

use futures::Stream;
use serde_json::Value;

use crate::{
  Error, Result,
  attributes::Resource,
  requester::{ApiRequest, Requester},
};

/// A forward-only sequence of `T` spread across one or more pages.
pub struct PaginatedList<T, R> {
  requester: Arc<R>,
  /// The request for the next unfetched page, if any.
  pending:   Option<ApiRequest>,
  buffer:    VecDeque<T>,
}

impl<T, R> PaginatedList<T, R>
where
  T: Resource,
  R: Requester,
{
  pub fn new(requester: Arc<R>, first_page: ApiRequest) -> Self {
    Self {
      requester,
      pending: Some(first_page),
      buffer: VecDeque::new(),
    }
  }

  /// The next item, fetching another page if the buffer is empty. Returns
  /// `None` once the last page is drained. After an error the list is
  /// exhausted.
  pub async fn next(&mut self) -> Option<Result<T>> {
    loop {
      if let Some(item) = self.buffer.pop_front() {
        return Some(Ok(item));
      }
      let request = self.pending.take()?;
      if let Err(e) = self.fetch(request).await {
        self.buffer.clear();
        return Some(Err(e));
      }
    }
  }

  /// Drain every remaining page.
  pub async fn collect_all(mut self) -> Result<Vec<T>> {
    let mut items = Vec::new();
    while let Some(item) = self.next().await {
      items.push(item?);
    }
    Ok(items)
  }

  /// Adapt the list into a [`Stream`].
  pub fn into_stream(self) -> impl Stream<Item = Result<T>> {
    futures::stream::unfold(self, |mut list| async move {
      let item = list.next().await?;
      Some((item, list))
    })
  }

  async fn fetch(&mut self, request: ApiRequest) -> Result<()> {
    let method = request.method;
    tracing::trace!(%method, endpoint = %request.endpoint, "fetching page");

    let response = self
      .requester
      .request(request)
      .await
      .map_err(Error::transport)?;

    let Value::Array(items) = response.body else {
      return Err(Error::UnexpectedPage(response.body.to_string()));
    };
    let items = items
      .into_iter()
      .map(T::from_json)
      .collect::<Result<Vec<_>>>()?;

    self.buffer.extend(items);
    self.pending = response
      .next
      .map(|url| ApiRequest::absolute(method, url));
    Ok(())
  }
}
