//! Outcome links — the association between one group and one outcome.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
  attributes::{Nullable, Resource},
  group::GroupRef,
  outcome::Outcome,
};

/// "This outcome is linked into this group."
///
/// Links are never created on their own; they come back from linking an
/// outcome into a group or from listing a group's outcomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeLink {
  /// Abbreviated outcome; at least `id` and `title`.
  pub outcome:       Outcome,
  pub outcome_group: GroupRef,
  #[serde(default, skip_serializing_if = "Nullable::is_absent")]
  pub url:           Nullable<String>,
  #[serde(flatten)]
  pub extra:         Map<String, Value>,
}

impl Resource for OutcomeLink {}

impl fmt::Display for OutcomeLink {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Group {} with Outcome {} ({})",
      self.outcome_group,
      self.outcome,
      self.url.as_deref().unwrap_or_default()
    )
  }
}

/// How much of each outcome the listing embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStyle {
  Abbrev,
  Full,
}

/// Filters for listing a group's linked outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkFilter {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub outcome_style: Option<OutcomeStyle>,
}

impl LinkFilter {
  pub fn full() -> Self {
    Self {
      outcome_style: Some(OutcomeStyle::Full),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn decodes_embedded_stubs() {
    let link = OutcomeLink::from_json(json!({
      "url": "/api/v1/global/outcome_groups/1/outcomes/2",
      "context_id": null,
      "context_type": null,
      "outcome_group": { "id": 1, "title": "Math" },
      "outcome": { "id": 2, "title": "Fractions", "context_type": null },
    }))
    .unwrap();
    assert_eq!(link.outcome.id, 2);
    assert_eq!(link.outcome_group.id, 1);
    assert!(link.extra.contains_key("context_id"));
    assert_eq!(
      link.to_string(),
      "Group Math with Outcome Fractions () (/api/v1/global/outcome_groups/1/outcomes/2)"
    );
  }

  #[test]
  fn filter_serialises_style() {
    assert_eq!(
      serde_json::to_value(LinkFilter::full()).unwrap(),
      json!({ "outcome_style": "full" })
    );
    assert_eq!(serde_json::to_value(LinkFilter::default()).unwrap(), json!({}));
  }
}
