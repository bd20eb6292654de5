//! Decoded response body
//!
//! `DecodedValue` is the one representation every renderer consumes. Responses
//! are converted into it at the boundary (see `request.rs`) so nothing deeper
//! ever touches a loosely typed `serde_json::Value`.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

/// Recursive tagged union for a parsed response body.
///
/// Object entries keep their decode order; arrays keep index order.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object(Vec<(String, DecodedValue)>),
    Array(Vec<DecodedValue>),
}

impl DecodedValue {
    pub fn is_composite(&self) -> bool {
        matches!(self, DecodedValue::Object(_) | DecodedValue::Array(_))
    }

    /// Plain string form used for inline display (no quoting, no escaping).
    ///
    /// Never use this for export or re-parsing; go through `pretty()` instead.
    pub fn plain_text(&self) -> String {
        match self {
            DecodedValue::Null => "null".to_string(),
            DecodedValue::Bool(b) => b.to_string(),
            DecodedValue::Number(n) => n.to_string(),
            DecodedValue::String(s) => s.clone(),
            DecodedValue::Array(items) => items
                .iter()
                .map(|item| item.plain_text())
                .collect::<Vec<_>>()
                .join(","),
            DecodedValue::Object(_) => "[object Object]".to_string(),
        }
    }

    /// JSON literal for a single value (strings come back quoted)
    pub fn literal(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.plain_text())
    }

    /// Canonical pretty-printed JSON with 2-space indentation
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.plain_text())
    }

    pub fn get(&self, key: &str) -> Option<&DecodedValue> {
        match self {
            DecodedValue::Object(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }
}

impl From<serde_json::Value> for DecodedValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DecodedValue::Null,
            serde_json::Value::Bool(b) => DecodedValue::Bool(b),
            serde_json::Value::Number(n) => DecodedValue::Number(n),
            serde_json::Value::String(s) => DecodedValue::String(s),
            serde_json::Value::Array(items) => {
                DecodedValue::Array(items.into_iter().map(DecodedValue::from).collect())
            }
            serde_json::Value::Object(map) => DecodedValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, DecodedValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for DecodedValue {
    fn from(text: &str) -> Self {
        DecodedValue::String(text.to_string())
    }
}

impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DecodedValue::Null => serializer.serialize_unit(),
            DecodedValue::Bool(b) => serializer.serialize_bool(*b),
            DecodedValue::Number(n) => n.serialize(serializer),
            DecodedValue::String(s) => serializer.serialize_str(s),
            DecodedValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DecodedValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Parse JSON text straight into a `DecodedValue`
pub fn parse_json(text: &str) -> Result<DecodedValue, serde_json::Error> {
    serde_json::from_str::<serde_json::Value>(text).map(DecodedValue::from)
}
