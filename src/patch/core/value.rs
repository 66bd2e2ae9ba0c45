use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Patch Value - Loosely Typed Inbound Values
// ============================================================================
//
// Values carried by patch operations arrive untyped. They are decoded into
// this tagged union once and converted into a member's declared type on
// demand through the fallible coercions in `node.rs`.
//
// ============================================================================

/// Loosely typed value carried by a patch operation
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatchValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
    Sequence(Vec<PatchValue>),
    Composite(BTreeMap<String, PatchValue>),
}

impl PatchValue {
    /// Short shape name used in type-mismatch messages
    pub fn shape_name(&self) -> &'static str {
        match self {
            PatchValue::Null => "null",
            PatchValue::Boolean(_) => "boolean",
            PatchValue::Number(_) => "number",
            PatchValue::Text(_) => "text",
            PatchValue::Sequence(_) => "sequence",
            PatchValue::Composite(_) => "composite",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PatchValue::Null)
    }

    pub fn text(value: impl Into<String>) -> Self {
        PatchValue::Text(value.into())
    }

    /// Build a composite from `(member, value)` pairs
    pub fn composite<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, PatchValue)>,
    {
        PatchValue::Composite(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<serde_json::Value> for PatchValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => PatchValue::Null,
            serde_json::Value::Bool(b) => PatchValue::Boolean(b),
            // A literal without an f64 form stays numeric text, never null
            serde_json::Value::Number(n) => n
                .as_f64()
                .map_or_else(|| PatchValue::Text(n.to_string()), PatchValue::Number),
            serde_json::Value::String(s) => PatchValue::Text(s),
            serde_json::Value::Array(items) => {
                PatchValue::Sequence(items.into_iter().map(PatchValue::from).collect())
            }
            serde_json::Value::Object(map) => PatchValue::Composite(
                map.into_iter().map(|(k, v)| (k, PatchValue::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for PatchValue {
    fn from(value: &str) -> Self {
        PatchValue::Text(value.to_string())
    }
}

impl From<String> for PatchValue {
    fn from(value: String) -> Self {
        PatchValue::Text(value)
    }
}

impl From<f64> for PatchValue {
    fn from(value: f64) -> Self {
        PatchValue::Number(value)
    }
}

impl From<bool> for PatchValue {
    fn from(value: bool) -> Self {
        PatchValue::Boolean(value)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_nested_structure() {
        let value = PatchValue::from(json!({
            "name": "Room1",
            "area": 12.2,
            "tags": ["a", true, null]
        }));

        let PatchValue::Composite(map) = value else {
            panic!("expected composite");
        };
        assert_eq!(map["name"], PatchValue::text("Room1"));
        assert_eq!(map["area"], PatchValue::Number(12.2));
        assert_eq!(
            map["tags"],
            PatchValue::Sequence(vec![
                PatchValue::text("a"),
                PatchValue::Boolean(true),
                PatchValue::Null,
            ])
        );
    }

    #[test]
    fn test_integers_become_numbers() {
        assert_eq!(PatchValue::from(json!(25)), PatchValue::Number(25.0));
    }

    #[test]
    fn test_numbers_never_become_null() {
        for raw in [json!(u64::MAX), json!(i64::MIN), json!(1e308)] {
            let value = PatchValue::from(raw);
            assert!(!value.is_null());
            assert!(matches!(value, PatchValue::Number(_)));
        }
    }

    #[test]
    fn test_deserialize_untagged() {
        let value: PatchValue = serde_json::from_str(r#"{"street":"Main"}"#).unwrap();
        assert_eq!(value, PatchValue::composite([("street", PatchValue::text("Main"))]));
    }

    #[test]
    fn test_shape_names() {
        assert_eq!(PatchValue::Null.shape_name(), "null");
        assert_eq!(PatchValue::text("x").shape_name(), "text");
        assert_eq!(PatchValue::Sequence(vec![]).shape_name(), "sequence");
    }
}
