//! Attribute-bag behaviour shared by every API entity.
//!
//! Each entity is a typed struct with a residual `extra` map, so any field the
//! server sends survives a decode/encode cycle. [`Resource`] converts between
//! the struct and its flat attribute map; [`Merge`] reports whether a mutating
//! call wrote a server response back into the local instance. Typed optional
//! fields are [`Nullable`], so a key sent as `null` is told apart from a key
//! that was never sent.

use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{Result, requester::ApiResponse};

/// A JSON-backed API entity.
pub trait Resource: Serialize + DeserializeOwned + Clone {
  /// Build an instance from a response document.
  fn from_json(value: Value) -> Result<Self> { Ok(serde_json::from_value(value)?) }

  /// The flat attribute map the instance serialises to.
  fn to_attributes(&self) -> Result<Map<String, Value>> {
    Ok(serde_json::from_value(serde_json::to_value(self)?)?)
  }

  /// Overwrite attributes with every key in `patch`; keys absent from `patch`
  /// keep their current value. On error `self` is left untouched.
  fn set_attributes(&mut self, patch: Map<String, Value>) -> Result<()> {
    let mut attrs = self.to_attributes()?;
    attrs.extend(patch);
    *self = Self::from_json(Value::Object(attrs))?;
    Ok(())
  }
}

// ─── Nullable attributes ─────────────────────────────────────────────────────

/// A typed attribute as the server sent it: missing, `null`, or a value.
///
/// Pair with `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`
/// so an entity re-encodes to exactly the keys it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nullable<T> {
  Absent,
  Null,
  Value(T),
}

impl<T> Default for Nullable<T> {
  fn default() -> Self { Self::Absent }
}

impl<T> Nullable<T> {
  pub fn is_absent(&self) -> bool { matches!(self, Self::Absent) }

  pub fn is_null(&self) -> bool { matches!(self, Self::Null) }

  pub fn get(&self) -> Option<&T> {
    match self {
      Self::Value(value) => Some(value),
      Self::Absent | Self::Null => None,
    }
  }

  pub fn as_deref(&self) -> Option<&T::Target>
  where
    T: Deref,
  {
    self.get().map(Deref::deref)
  }

  pub fn into_option(self) -> Option<T> {
    match self {
      Self::Value(value) => Some(value),
      Self::Absent | Self::Null => None,
    }
  }
}

impl<T> From<T> for Nullable<T> {
  fn from(value: T) -> Self { Self::Value(value) }
}

impl<T: Serialize> Serialize for Nullable<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Self::Value(value) => value.serialize(serializer),
      Self::Absent | Self::Null => serializer.serialize_none(),
    }
  }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(match Option::<T>::deserialize(deserializer)? {
      Some(value) => Self::Value(value),
      None => Self::Null,
    })
  }
}

// ─── Merge result ────────────────────────────────────────────────────────────

/// Outcome of a mutating call whose response may be written back into the
/// local instance.
#[must_use = "a mutating call may leave the instance unchanged; check the result"]
#[derive(Debug, Clone, PartialEq)]
pub enum Merge<T> {
  /// The response carried the sentinel key and was merged; holds the new
  /// state.
  Updated(T),
  /// The response lacked the sentinel key; nothing was written.
  Unchanged,
}

impl<T> Merge<T> {
  pub fn is_updated(&self) -> bool { matches!(self, Self::Updated(_)) }

  pub fn updated(self) -> Option<T> {
    match self {
      Self::Updated(state) => Some(state),
      Self::Unchanged => None,
    }
  }
}

/// Merge `response` into `target` iff its body is an object containing
/// `sentinel`.
///
/// The merge is all-or-nothing: a response whose keys cannot be decoded into
/// `T` (e.g. `{"id": null}` against a required `u64` id) is a
/// [`Error::Decode`](crate::Error::Decode) and `target` is left as it was,
/// even though the sentinel key is present.
pub(crate) fn merge_response<T: Resource>(
  target: &mut T,
  response: ApiResponse,
  sentinel: &str,
) -> Result<Merge<T>> {
  if !response.has_key(sentinel) {
    tracing::debug!(sentinel, "response lacks sentinel key; not merging");
    return Ok(Merge::Unchanged);
  }
  let Value::Object(patch) = response.body else {
    return Ok(Merge::Unchanged);
  };
  target.set_attributes(patch)?;
  Ok(Merge::Updated(target.clone()))
}
