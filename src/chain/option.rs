// SPDX-License-Identifier: MPL-2.0

//! Option types for dependency chains.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a selectable option.
///
/// Backends return ids either as JSON numbers or as JSON strings, sometimes
/// both within the same API. Uniqueness is only meaningful within one option
/// list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Int(i64),
    Text(String),
}

impl OptionValue {
    /// Reads an identifier from a JSON value.
    ///
    /// Integral numbers and non-empty strings are accepted; anything else
    /// (floats, booleans, objects, blank strings) is not an identifier.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Number(n) => n.as_i64().map(OptionValue::Int),
            serde_json::Value::String(s) if !s.trim().is_empty() => {
                Some(OptionValue::Text(s.clone()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Int(n) => write!(f, "{}", n),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

/// A single `{ value, label }` entry of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Identifier sent back to the API as the parent of the next level.
    pub value: OptionValue,
    /// Display text.
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for SelectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_from_json() {
        assert_eq!(OptionValue::from_json(&json!(5)), Some(OptionValue::Int(5)));
        assert_eq!(
            OptionValue::from_json(&json!("ch-7")),
            Some(OptionValue::Text("ch-7".to_string()))
        );
        assert_eq!(OptionValue::from_json(&json!(1.5)), None);
        assert_eq!(OptionValue::from_json(&json!("  ")), None);
        assert_eq!(OptionValue::from_json(&json!(null)), None);
    }

    #[test]
    fn test_value_deserializes_untagged() {
        let values: Vec<OptionValue> = serde_json::from_value(json!([3, "abc"])).unwrap();
        assert_eq!(values, vec![OptionValue::Int(3), OptionValue::from("abc")]);
        assert_eq!(values[0].to_string(), "3");
        assert_eq!(values[1].to_string(), "abc");
    }
}
