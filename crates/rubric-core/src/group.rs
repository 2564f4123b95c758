//! Outcome groups — the nodes of an outcome tree.
//!
//! A group belongs to one [`ContextScope`]. The scope is resolved from
//! `context_type` / `context_id` when the group is decoded and never changes
//! afterwards, even when a later response is merged into the instance.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
  Result,
  attributes::{Nullable, Resource},
  scope::{ContextScope, ScopeError},
};

// ─── Entity ──────────────────────────────────────────────────────────────────

/// An outcome group as returned by `GET {scope}/outcome_groups/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOutcomeGroup", into = "RawOutcomeGroup")]
pub struct OutcomeGroup {
  pub id:           u64,
  pub title:        Nullable<String>,
  pub url:          Nullable<String>,
  pub context_type: Nullable<String>,
  pub context_id:   Nullable<u64>,
  pub extra:        Map<String, Value>,
  scope:            ContextScope,
}

impl OutcomeGroup {
  /// The scope every request for this group is routed through.
  pub fn scope(&self) -> ContextScope { self.scope }

  /// `{scope}/outcome_groups/{id}`
  pub fn path(&self) -> String {
    format!("{}/outcome_groups/{}", self.scope.path_prefix(), self.id)
  }

  pub fn attr(&self, key: &str) -> Option<&Value> { self.extra.get(key) }
}

impl Resource for OutcomeGroup {
  fn from_json(value: Value) -> Result<Self> {
    let raw: RawOutcomeGroup = serde_json::from_value(value)?;
    Ok(raw.try_into()?)
  }

  fn set_attributes(&mut self, patch: Map<String, Value>) -> Result<()> {
    let mut attrs = self.to_attributes()?;
    attrs.extend(patch);
    let raw: RawOutcomeGroup = serde_json::from_value(Value::Object(attrs))?;
    *self = raw.with_scope(self.scope);
    Ok(())
  }
}

impl fmt::Display for OutcomeGroup {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} ({})",
      self.title.as_deref().unwrap_or_default(),
      self.url.as_deref().unwrap_or_default()
    )
  }
}

// ─── Wire form ───────────────────────────────────────────────────────────────

/// The group exactly as the API sends it, before scope resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawOutcomeGroup {
  id:           u64,
  #[serde(default, skip_serializing_if = "Nullable::is_absent")]
  title:        Nullable<String>,
  #[serde(default, skip_serializing_if = "Nullable::is_absent")]
  url:          Nullable<String>,
  #[serde(default, skip_serializing_if = "Nullable::is_absent")]
  context_type: Nullable<String>,
  #[serde(default, skip_serializing_if = "Nullable::is_absent")]
  context_id:   Nullable<u64>,
  #[serde(flatten)]
  extra:        Map<String, Value>,
}

impl RawOutcomeGroup {
  fn with_scope(self, scope: ContextScope) -> OutcomeGroup {
    OutcomeGroup {
      id: self.id,
      title: self.title,
      url: self.url,
      context_type: self.context_type,
      context_id: self.context_id,
      extra: self.extra,
      scope,
    }
  }
}

impl TryFrom<RawOutcomeGroup> for OutcomeGroup {
  type Error = ScopeError;

  fn try_from(raw: RawOutcomeGroup) -> Result<Self, ScopeError> {
    let scope = ContextScope::resolve(raw.context_type.as_deref(), raw.context_id.get().copied())?;
    Ok(raw.with_scope(scope))
  }
}

impl From<OutcomeGroup> for RawOutcomeGroup {
  fn from(group: OutcomeGroup) -> Self {
    Self {
      id:           group.id,
      title:        group.title,
      url:          group.url,
      context_type: group.context_type,
      context_id:   group.context_id,
      extra:        group.extra,
    }
  }
}

// ─── Embedded reference ──────────────────────────────────────────────────────

/// The abbreviated group embedded in an outcome link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRef {
  pub id:    u64,
  #[serde(default, skip_serializing_if = "Nullable::is_absent")]
  pub title: Nullable<String>,
  #[serde(default, skip_serializing_if = "Nullable::is_absent")]
  pub url:   Nullable<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl fmt::Display for GroupRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.title.as_deref().unwrap_or_default())
  }
}

// ─── Writable fields ─────────────────────────────────────────────────────────

/// Optional fields accepted when creating or updating a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:                   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub vendor_guid:             Option<String>,
  /// Re-parent the group (update only).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parent_outcome_group_id: Option<u64>,
}

impl GroupFields {
  pub fn new() -> Self { Self::default() }

  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn vendor_guid(mut self, guid: impl Into<String>) -> Self {
    self.vendor_guid = Some(guid.into());
    self
  }

  pub fn parent(mut self, parent_id: u64) -> Self {
    self.parent_outcome_group_id = Some(parent_id);
    self
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::Error;

  #[test]
  fn decodes_each_scope() {
    let course = OutcomeGroup::from_json(json!({
      "id": 1, "title": "G", "context_type": "Course", "context_id": 10,
    }))
    .unwrap();
    assert_eq!(course.scope(), ContextScope::Course(10));
    assert_eq!(course.path(), "courses/10/outcome_groups/1");

    let account = OutcomeGroup::from_json(json!({
      "id": 2, "context_type": "Account", "context_id": 20,
    }))
    .unwrap();
    assert_eq!(account.scope(), ContextScope::Account(20));

    let global = OutcomeGroup::from_json(json!({
      "id": 3, "context_type": null, "context_id": null,
    }))
    .unwrap();
    assert_eq!(global.scope(), ContextScope::Global);
    assert_eq!(global.path(), "global/outcome_groups/3");
  }

  #[test]
  fn unrecognised_context_type_fails_fast() {
    let err = OutcomeGroup::from_json(json!({
      "id": 1, "context_type": "Planet", "context_id": 4,
    }))
    .unwrap_err();
    assert!(
      matches!(err, Error::Scope(ScopeError::Unrecognised(ref t)) if t == "Planet"),
      "got {err:?}"
    );
  }

  #[test]
  fn serde_path_also_validates_scope() {
    let result: std::result::Result<OutcomeGroup, serde_json::Error> =
      serde_json::from_value(json!({ "id": 1, "context_type": "Course" }));
    assert!(result.is_err());
  }

  #[test]
  fn merge_keeps_scope() {
    let mut group = OutcomeGroup::from_json(json!({
      "id": 1, "title": "Old", "context_type": "Course", "context_id": 10,
    }))
    .unwrap();

    let mut patch = Map::new();
    patch.insert("title".into(), json!("New"));
    patch.insert("context_type".into(), json!("Account"));
    patch.insert("context_id".into(), json!(99));
    group.set_attributes(patch).unwrap();

    assert_eq!(group.title.as_deref(), Some("New"));
    assert_eq!(group.context_type.as_deref(), Some("Account"));
    assert_eq!(group.scope(), ContextScope::Course(10));
  }

  #[test]
  fn attributes_round_trip() {
    let doc = json!({
      "id": 4,
      "title": "Math",
      "url": "/api/v1/global/outcome_groups/4",
      "vendor_guid": "abc",
      "can_edit": true,
    });
    let group = OutcomeGroup::from_json(doc.clone()).unwrap();
    assert_eq!(Value::Object(group.to_attributes().unwrap()), doc);
  }

  #[test]
  fn explicit_nulls_survive_round_trip() {
    let doc = json!({
      "id": 3,
      "title": "G",
      "url": null,
      "context_type": null,
      "context_id": null,
    });
    let group = OutcomeGroup::from_json(doc.clone()).unwrap();
    assert_eq!(group.scope(), ContextScope::Global);
    assert!(group.context_type.is_null());
    assert!(group.url.is_null());
    assert_eq!(Value::Object(group.to_attributes().unwrap()), doc);
    assert_eq!(serde_json::to_value(&group).unwrap(), doc);

    // Absent keys stay absent.
    let sparse = OutcomeGroup::from_json(json!({ "id": 3 })).unwrap();
    assert!(sparse.context_type.is_absent());
    assert_eq!(
      Value::Object(sparse.to_attributes().unwrap()),
      json!({ "id": 3 })
    );
  }
}
