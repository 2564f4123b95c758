//! [`OutcomesClient`] — the outcome and outcome-group operations.
//!
//! Group operations route through the group's [`ContextScope`]:
//!
//! | Scope     | Path prefix      |
//! |-----------|------------------|
//! | `Course`  | `courses/{id}`   |
//! | `Account` | `accounts/{id}`  |
//! | `Global`  | `global`         |
//!
//! Outcome operations are unscoped (`outcomes/{id}`).

use std::sync::Arc;

use serde::Serialize;

use crate::{
  Error, Result,
  attributes::{Merge, Resource, merge_response},
  group::{GroupFields, OutcomeGroup},
  link::{LinkFilter, OutcomeLink},
  outcome::{Outcome, OutcomeFields, OutcomeId},
  pagination::PaginatedList,
  requester::{ApiRequest, ApiResponse, Params, Requester},
  scope::ContextScope,
};

/// Client for the outcomes API over any [`Requester`].
///
/// Cheap to clone — the requester is shared behind an `Arc`.
pub struct OutcomesClient<R> {
  requester: Arc<R>,
}

impl<R> Clone for OutcomesClient<R> {
  fn clone(&self) -> Self {
    Self {
      requester: Arc::clone(&self.requester),
    }
  }
}

impl<R: Requester> OutcomesClient<R> {
  pub fn new(requester: R) -> Self { Self::from_arc(Arc::new(requester)) }

  pub fn from_arc(requester: Arc<R>) -> Self { Self { requester } }

  pub fn requester(&self) -> &R { &self.requester }

  async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
    tracing::debug!(
      method = %request.method,
      endpoint = %request.endpoint,
      "outcomes api request"
    );
    self
      .requester
      .request(request)
      .await
      .map_err(Error::transport)
  }

  async fn fetch<T: Resource>(&self, request: ApiRequest) -> Result<T> {
    let response = self.send(request).await?;
    T::from_json(response.body)
  }

  fn paginate<T: Resource>(&self, request: ApiRequest) -> PaginatedList<T, R> {
    PaginatedList::new(Arc::clone(&self.requester), request)
  }

  // ── Outcomes ──────────────────────────────────────────────────────────────

  /// `GET outcomes/:id`
  pub async fn outcome(&self, id: u64) -> Result<Outcome> {
    self.fetch(ApiRequest::get(format!("outcomes/{id}"))).await
  }

  /// `GET outcomes/:id` — a fresh copy of `outcome`.
  pub async fn show_outcome(&self, outcome: &Outcome) -> Result<Outcome> {
    self.outcome(outcome.id).await
  }

  /// `PUT outcomes/:id`
  ///
  /// The response is merged into `outcome` only if it carries an `id`.
  pub async fn update_outcome(
    &self,
    outcome: &mut Outcome,
    fields: &OutcomeFields,
  ) -> Result<Merge<Outcome>> {
    let request =
      ApiRequest::put(format!("outcomes/{}", outcome.id)).with_params(to_params(fields)?);
    let response = self.send(request).await?;
    merge_response(outcome, response, "id")
  }

  /// `GET outcomes/:outcome_id` for the outcome a link points at.
  pub async fn get_outcome(&self, link: &OutcomeLink) -> Result<Outcome> {
    self.outcome(link.outcome.id).await
  }

  // ── Group lookups ─────────────────────────────────────────────────────────

  /// `GET {scope}/outcome_groups/:id`
  pub async fn outcome_group(&self, scope: ContextScope, id: u64) -> Result<OutcomeGroup> {
    let path = format!("{}/outcome_groups/{id}", scope.path_prefix());
    self.fetch(ApiRequest::get(path)).await
  }

  /// `GET {scope}/root_outcome_group`
  pub async fn root_outcome_group(&self, scope: ContextScope) -> Result<OutcomeGroup> {
    let path = format!("{}/root_outcome_group", scope.path_prefix());
    self.fetch(ApiRequest::get(path)).await
  }

  /// `GET {scope}/outcome_groups` — courses and accounts only.
  pub fn outcome_groups(
    &self,
    scope: ContextScope,
  ) -> Result<PaginatedList<OutcomeGroup, R>> {
    let prefix = scoped_listing("outcome_groups", scope)?;
    Ok(self.paginate(ApiRequest::get(format!("{prefix}/outcome_groups"))))
  }

  /// `GET {scope}/outcome_group_links` — courses and accounts only.
  pub fn outcome_group_links(
    &self,
    scope: ContextScope,
  ) -> Result<PaginatedList<OutcomeLink, R>> {
    let prefix = scoped_listing("outcome_group_links", scope)?;
    Ok(self.paginate(ApiRequest::get(format!("{prefix}/outcome_group_links"))))
  }

  // ── Groups ────────────────────────────────────────────────────────────────

  /// `GET {scope}/outcome_groups/:id` — a fresh copy of `group`.
  pub async fn show_group(&self, group: &OutcomeGroup) -> Result<OutcomeGroup> {
    self.fetch(ApiRequest::get(group.path())).await
  }

  /// `PUT {scope}/outcome_groups/:id`
  ///
  /// The response is merged into `group` only if it carries an `id`.
  pub async fn update_group(
    &self,
    group: &mut OutcomeGroup,
    fields: &GroupFields,
  ) -> Result<Merge<OutcomeGroup>> {
    let request = ApiRequest::put(group.path()).with_params(to_params(fields)?);
    let response = self.send(request).await?;
    merge_response(group, response, "id")
  }

  /// `DELETE {scope}/outcome_groups/:id`
  ///
  /// The server answers with the deleted group; it is merged into `group`
  /// only if it carries an `id`.
  pub async fn delete_group(&self, group: &mut OutcomeGroup) -> Result<Merge<OutcomeGroup>> {
    let response = self.send(ApiRequest::delete(group.path())).await?;
    merge_response(group, response, "id")
  }

  /// `GET {scope}/outcome_groups/:id/outcomes`
  pub fn list_linked_outcomes(
    &self,
    group: &OutcomeGroup,
    filter: &LinkFilter,
  ) -> Result<PaginatedList<OutcomeLink, R>> {
    let request =
      ApiRequest::get(format!("{}/outcomes", group.path())).with_params(to_params(filter)?);
    Ok(self.paginate(request))
  }

  /// `PUT {scope}/outcome_groups/:id/outcomes/:outcome_id`
  pub async fn link_existing(
    &self,
    group: &OutcomeGroup,
    outcome: impl Into<OutcomeId>,
  ) -> Result<OutcomeLink> {
    let outcome = outcome.into();
    self
      .fetch(ApiRequest::put(format!("{}/outcomes/{outcome}", group.path())))
      .await
  }

  /// `POST {scope}/outcome_groups/:id/outcomes` — create an outcome and link
  /// it into `group`.
  pub async fn link_new(
    &self,
    group: &OutcomeGroup,
    title: &str,
    fields: &OutcomeFields,
  ) -> Result<OutcomeLink> {
    let params = titled_params(title, fields)?;
    self
      .fetch(ApiRequest::post(format!("{}/outcomes", group.path())).with_params(params))
      .await
  }

  /// `DELETE {scope}/outcome_groups/:id/outcomes/:outcome_id`
  ///
  /// The server answers with the removed link; it is merged into `group` only
  /// if it carries a `context_id`.
  pub async fn unlink_outcome(
    &self,
    group: &mut OutcomeGroup,
    outcome: impl Into<OutcomeId>,
  ) -> Result<Merge<OutcomeGroup>> {
    let outcome = outcome.into();
    let request = ApiRequest::delete(format!("{}/outcomes/{outcome}", group.path()));
    let response = self.send(request).await?;
    merge_response(group, response, "context_id")
  }

  /// `GET {scope}/outcome_groups/:id/subgroups`
  pub fn list_subgroups(&self, group: &OutcomeGroup) -> PaginatedList<OutcomeGroup, R> {
    self.paginate(ApiRequest::get(format!("{}/subgroups", group.path())))
  }

  /// `POST {scope}/outcome_groups/:id/subgroups`
  pub async fn create_subgroup(
    &self,
    group: &OutcomeGroup,
    title: &str,
    fields: &GroupFields,
  ) -> Result<OutcomeGroup> {
    let params = titled_params(title, fields)?;
    self
      .fetch(ApiRequest::post(format!("{}/subgroups", group.path())).with_params(params))
      .await
  }

  /// `POST {scope}/outcome_groups/:id/import` — copy `source_outcome_group_id`
  /// into `group` as a new subgroup.
  pub async fn import_outcome_group(
    &self,
    group: &OutcomeGroup,
    source_outcome_group_id: u64,
  ) -> Result<OutcomeGroup> {
    let request = ApiRequest::post(format!("{}/import", group.path()))
      .with_param("source_outcome_group_id", source_outcome_group_id);
    self.fetch(request).await
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn to_params<T: Serialize>(fields: &T) -> Result<Params> {
  Ok(serde_json::from_value(serde_json::to_value(fields)?)?)
}

/// `fields` plus a mandatory, non-blank `title` that overrides any title in
/// `fields`.
fn titled_params<T: Serialize>(title: &str, fields: &T) -> Result<Params> {
  if title.trim().is_empty() {
    return Err(Error::EmptyTitle);
  }
  let mut params = to_params(fields)?;
  params.insert("title".to_string(), title.into());
  Ok(params)
}

/// Collection listings exist under courses and accounts but not `global`.
fn scoped_listing(operation: &'static str, scope: ContextScope) -> Result<String> {
  if scope.is_global() {
    return Err(Error::UnsupportedScope { operation, scope });
  }
  Ok(scope.path_prefix())
}
