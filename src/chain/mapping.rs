// SPDX-License-Identifier: MPL-2.0

//! Reduction of API payloads into option lists.
//!
//! The LMS backend is not consistent about response shapes: the same kind of
//! list may come back as a bare array, under `data`, under `items`, or nested
//! one level deeper. Each level therefore carries an [`Envelope`] describing
//! where to look and an [`Extractor`] describing how to turn one entity into a
//! [`SelectOption`].

use super::option::{OptionValue, SelectOption};
use crate::api::ApiError;
use serde_json::Value;

/// How deep nested envelopes (`{"data": {"items": [...]}}`) are followed.
const MAX_ENVELOPE_DEPTH: usize = 2;

/// Keys searched for the entity array when the body is an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    keys: Vec<&'static str>,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::with_keys(&["data", "items", "results"])
    }
}

impl Envelope {
    /// Only a bare JSON array is accepted.
    pub fn bare() -> Self {
        Self { keys: Vec::new() }
    }

    /// Accepts a bare array or an array under any of `keys`, tried in order.
    pub fn with_keys(keys: &[&'static str]) -> Self {
        Self {
            keys: keys.to_vec(),
        }
    }

    /// Finds the entity array inside `body`.
    pub fn locate<'v>(&self, body: &'v Value) -> Option<&'v [Value]> {
        self.locate_at(body, 0)
    }

    fn locate_at<'v>(&self, body: &'v Value, depth: usize) -> Option<&'v [Value]> {
        match body {
            Value::Array(items) => Some(items),
            Value::Object(map) if depth < MAX_ENVELOPE_DEPTH => self
                .keys
                .iter()
                .find_map(|key| map.get(*key).and_then(|inner| self.locate_at(inner, depth + 1))),
            _ => None,
        }
    }
}

/// Candidate field names for an entity's id and display text.
///
/// Candidates are tried in order; the label falls back to the id when none
/// of the label fields hold text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub value_fields: &'static [&'static str],
    pub label_fields: &'static [&'static str],
}

impl FieldMapping {
    pub const fn new(
        value_fields: &'static [&'static str],
        label_fields: &'static [&'static str],
    ) -> Self {
        Self {
            value_fields,
            label_fields,
        }
    }

    /// Maps one entity, or `None` when it has no usable id.
    pub fn extract(&self, entity: &Value) -> Option<SelectOption> {
        let value = self
            .value_fields
            .iter()
            .find_map(|field| entity.get(*field).and_then(OptionValue::from_json))?;

        let label = self
            .label_fields
            .iter()
            .find_map(|field| entity.get(*field).and_then(label_text))
            .unwrap_or_else(|| value.to_string());

        Some(SelectOption { value, label })
    }
}

/// Reduction from one API entity to a [`SelectOption`].
#[derive(Debug, Clone, Copy)]
pub enum Extractor {
    Fields(FieldMapping),
    /// Arbitrary mapping for entities whose label is composed from several fields.
    Custom(fn(&Value) -> Option<SelectOption>),
}

impl Extractor {
    pub fn extract(&self, entity: &Value) -> Option<SelectOption> {
        match self {
            Extractor::Fields(mapping) => mapping.extract(entity),
            Extractor::Custom(map) => map(entity),
        }
    }
}

impl From<FieldMapping> for Extractor {
    fn from(mapping: FieldMapping) -> Self {
        Extractor::Fields(mapping)
    }
}

/// Text usable as a label: non-blank strings and numbers.
pub fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Turns a response body into options.
///
/// Entities the extractor rejects are skipped. A body without any entity
/// array is a [`ApiError::MalformedPayload`].
pub fn normalize(
    body: &Value,
    envelope: &Envelope,
    extractor: &Extractor,
) -> Result<Vec<SelectOption>, ApiError> {
    let entities = envelope.locate(body).ok_or_else(|| {
        ApiError::MalformedPayload(format!("no entity list in response: {}", shape_of(body)))
    })?;

    let options: Vec<SelectOption> = entities
        .iter()
        .filter_map(|entity| {
            let option = extractor.extract(entity);
            if option.is_none() {
                tracing::debug!(%entity, "skipping entity without usable id");
            }
            option
        })
        .collect();

    Ok(options)
}

/// Short description of a JSON value for error messages.
fn shape_of(body: &Value) -> String {
    match body {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        Value::Array(_) => "array".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const COURSE: FieldMapping = FieldMapping::new(&["id"], &["name", "title"]);
    const CHAPTER: FieldMapping = FieldMapping::new(&["chapter_id", "id"], &["chapter_name"]);

    #[test]
    fn test_envelope_accepts_known_shapes() {
        let envelope = Envelope::default();
        let bare = json!([{"id": 1}]);
        let data = json!({"data": [{"id": 1}]});
        let items = json!({"success": true, "items": [{"id": 1}]});
        let nested = json!({"data": {"items": [{"id": 1}]}});

        for body in [&bare, &data, &items, &nested] {
            assert_eq!(envelope.locate(body).map(|e| e.len()), Some(1), "{body}");
        }
    }

    #[test]
    fn test_envelope_stops_at_max_depth() {
        let envelope = Envelope::default();
        let too_deep = json!({"data": {"data": {"items": [{"id": 1}]}}});
        assert!(envelope.locate(&too_deep).is_none());
    }

    #[test]
    fn test_bare_envelope_ignores_keys() {
        assert!(Envelope::bare().locate(&json!({"data": []})).is_none());
        assert!(Envelope::bare().locate(&json!([])).is_some());
    }

    #[test]
    fn test_field_mapping_candidates_and_fallback() {
        assert_eq!(
            COURSE.extract(&json!({"id": 1, "title": "Algebra"})),
            Some(SelectOption::new(1, "Algebra"))
        );
        assert_eq!(
            CHAPTER.extract(&json!({"chapter_id": "c-9", "chapter_name": " Limits "})),
            Some(SelectOption::new("c-9", "Limits"))
        );
        // no label field: the id doubles as the label
        assert_eq!(
            CHAPTER.extract(&json!({"id": 4})),
            Some(SelectOption::new(4, "4"))
        );
        assert_eq!(COURSE.extract(&json!({"name": "orphan"})), None);
        assert_eq!(COURSE.extract(&json!("not an object")), None);
    }

    #[test]
    fn test_custom_extractor() {
        fn initials(entity: &Value) -> Option<SelectOption> {
            let id = entity.get("id").and_then(OptionValue::from_json)?;
            let name = entity.get("name")?.as_str()?;
            Some(SelectOption {
                value: id,
                label: name.chars().take(2).collect(),
            })
        }

        let extractor = Extractor::Custom(initials);
        assert_eq!(
            extractor.extract(&json!({"id": 2, "name": "Grace"})),
            Some(SelectOption::new(2, "Gr"))
        );
    }

    #[test]
    fn test_normalize_skips_unmappable_entities() {
        let body = json!({"items": [{"id": 1, "name": "A"}, {"name": "no id"}, {"id": 3}]});
        let options = normalize(&body, &Envelope::default(), &COURSE.into()).unwrap();
        assert_eq!(
            options,
            vec![SelectOption::new(1, "A"), SelectOption::new(3, "3")]
        );
    }

    #[test]
    fn test_normalize_malformed_payload() {
        let err = normalize(&json!({"success": true}), &Envelope::default(), &COURSE.into())
            .unwrap_err();
        match err {
            ApiError::MalformedPayload(msg) => assert!(msg.contains("success")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(normalize(&json!(null), &Envelope::default(), &COURSE.into()).is_err());
    }
}
