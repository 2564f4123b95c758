//! Flattening of nested parameters into bracketed query pairs.
//!
//! `{"ratings": [{"points": 3}], "style": "full"}` becomes
//! `ratings[][points]=3&style=full`, the form the LMS API parses.

use rubric_core::Params;
use serde_json::Value;

pub(crate) fn flatten(params: &Params) -> Vec<(String, String)> {
  let mut pairs = Vec::new();
  for (key, value) in params {
    push(&mut pairs, key.clone(), value);
  }
  pairs
}

fn push(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
  match value {
    Value::Null => {}
    Value::Bool(b) => pairs.push((key, b.to_string())),
    Value::Number(n) => pairs.push((key, n.to_string())),
    Value::String(s) => pairs.push((key, s.clone())),
    Value::Array(items) => {
      for item in items {
        push(pairs, format!("{key}[]"), item);
      }
    }
    Value::Object(map) => {
      for (sub, item) in map {
        push(pairs, format!("{key}[{sub}]"), item);
      }
    }
  }
}
