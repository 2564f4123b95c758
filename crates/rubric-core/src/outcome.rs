//! Outcome — a single competency or rubric criterion definition.
//!
//! Outcomes are created server-side by linking a new outcome into a group and
//! are never deleted directly; they disappear when unlinked from every group.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::attributes::{Nullable, Resource};

// ─── Entity ──────────────────────────────────────────────────────────────────

/// An outcome as returned by `GET outcomes/:id`.
///
/// Fields the server sends beyond the ones modelled here (description,
/// mastery points, ratings, ...) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
  pub id:    u64,
  #[serde(default, skip_serializing_if = "Nullable::is_absent")]
  pub title: Nullable<String>,
  #[serde(default, skip_serializing_if = "Nullable::is_absent")]
  pub url:   Nullable<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Outcome {
  /// Look up a field that has no typed accessor.
  pub fn attr(&self, key: &str) -> Option<&Value> { self.extra.get(key) }
}

impl Resource for Outcome {}

impl fmt::Display for Outcome {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} ({})",
      self.title.as_deref().unwrap_or_default(),
      self.url.as_deref().unwrap_or_default()
    )
  }
}

/// An outcome reference: either a fetched [`Outcome`] or its bare id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeId(pub u64);

impl From<u64> for OutcomeId {
  fn from(id: u64) -> Self { Self(id) }
}

impl From<&Outcome> for OutcomeId {
  fn from(outcome: &Outcome) -> Self { Self(outcome.id) }
}

impl fmt::Display for OutcomeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Writable fields ─────────────────────────────────────────────────────────

/// How mastery is computed from a student's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
  DecayingAverage,
  NMastery,
  Latest,
  Highest,
  Average,
}

/// One level of an outcome's rating scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
  pub description: String,
  pub points:      f64,
}

/// Optional fields accepted when creating or updating an outcome.
///
/// Unset fields are omitted from the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutcomeFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:              Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub display_name:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub vendor_guid:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mastery_points:     Option<f64>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub ratings:            Vec<Rating>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub calculation_method: Option<CalculationMethod>,
  /// Only meaningful for `decaying_average` (weight) and `n_mastery` (count).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub calculation_int:    Option<u32>,
}

impl OutcomeFields {
  pub fn new() -> Self { Self::default() }

  pub fn title(mut self, title: impl Into<String>) -> Self {
    self.title = Some(title.into());
    self
  }

  pub fn display_name(mut self, name: impl Into<String>) -> Self {
    self.display_name = Some(name.into());
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

  pub fn mastery_points(mut self, points: f64) -> Self {
    self.mastery_points = Some(points);
    self
  }

  pub fn rating(mut self, description: impl Into<String>, points: f64) -> Self {
    self.ratings.push(Rating {
      description: description.into(),
      points,
    });
    self
  }

  pub fn calculation(mut self, method: CalculationMethod, int: Option<u32>) -> Self {
    self.calculation_method = Some(method);
    self.calculation_int = int;
    self
  }
}
