use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::value::PatchValue;

// ============================================================================
// Patch Operations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::Remove => "remove",
            OperationKind::Replace => "replace",
            OperationKind::Move => "move",
            OperationKind::Copy => "copy",
            OperationKind::Test => "test",
        }
    }

    pub fn requires_from(&self) -> bool {
        matches!(self, OperationKind::Move | OperationKind::Copy)
    }

    pub fn requires_value(&self) -> bool {
        matches!(
            self,
            OperationKind::Add | OperationKind::Replace | OperationKind::Test
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation kind: {0:?}")]
pub struct UnknownOperationKind(pub String);

impl FromStr for OperationKind {
    type Err = UnknownOperationKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "add" => Ok(OperationKind::Add),
            "remove" => Ok(OperationKind::Remove),
            "replace" => Ok(OperationKind::Replace),
            "move" => Ok(OperationKind::Move),
            "copy" => Ok(OperationKind::Copy),
            "test" => Ok(OperationKind::Test),
            _ => Err(UnknownOperationKind(s.to_string())),
        }
    }
}

/// One operation as it appears in the inbound document.
///
/// `op` stays a plain string so that an unknown kind is reported by the
/// engine against the operation that carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub op: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<PatchValue>,
}

// A present `"value": null` must stay distinguishable from a missing value
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<PatchValue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(Some(PatchValue::from(raw)))
}

impl OperationRecord {
    pub fn new(op: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            op: op.into(),
            path: path.into(),
            from: None,
            value: None,
        }
    }

    pub fn add(path: impl Into<String>, value: impl Into<PatchValue>) -> Self {
        Self::new("add", path).with_value(value)
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self::new("remove", path)
    }

    pub fn replace(path: impl Into<String>, value: impl Into<PatchValue>) -> Self {
        Self::new("replace", path).with_value(value)
    }

    pub fn move_from(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new("move", path).with_from(from)
    }

    pub fn copy_from(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new("copy", path).with_from(from)
    }

    pub fn test(path: impl Into<String>, value: impl Into<PatchValue>) -> Self {
        Self::new("test", path).with_value(value)
    }

    pub fn with_value(mut self, value: impl Into<PatchValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }
}

/// Ordered list of operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(Vec<OperationRecord>);

impl PatchDocument {
    pub fn new(operations: Vec<OperationRecord>) -> Self {
        Self(operations)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn operations(&self) -> &[OperationRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<OperationRecord>> for PatchDocument {
    fn from(operations: Vec<OperationRecord>) -> Self {
        Self(operations)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_operation_kinds() {
        assert_eq!("add".parse::<OperationKind>().unwrap(), OperationKind::Add);
        assert_eq!("Replace".parse::<OperationKind>().unwrap(), OperationKind::Replace);
        assert!("merge".parse::<OperationKind>().is_err());
    }

    #[test]
    fn test_document_from_json() {
        let doc = PatchDocument::from_json(
            r#"[
                {"op": "replace", "path": "/address/street", "value": "New street name"},
                {"op": "add", "path": "/rooms/-", "value": {"name": "Room1", "color": "Red", "area": 12.2}},
                {"op": "move", "from": "/rooms/0", "path": "/rooms/-"},
                {"op": "remove", "path": "/area"}
            ]"#,
        )
        .unwrap();

        assert_eq!(doc.len(), 4);
        let ops = doc.operations();
        assert_eq!(ops[0], OperationRecord::replace("/address/street", "New street name"));
        assert_eq!(ops[2].from.as_deref(), Some("/rooms/0"));
        assert_eq!(ops[3].value, None);
    }

    #[test]
    fn test_explicit_null_value_is_present() {
        let doc = PatchDocument::from_json(
            r#"[{"op": "replace", "path": "/address/flatNumber", "value": null}]"#,
        )
        .unwrap();

        assert_eq!(doc.operations()[0].value, Some(PatchValue::Null));
    }

    #[test]
    fn test_unknown_kind_still_deserializes() {
        let doc = PatchDocument::from_json(r#"[{"op": "merge", "path": "/name"}]"#).unwrap();
        assert_eq!(doc.operations()[0].op, "merge");
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let json = serde_json::to_string(&OperationRecord::remove("/area")).unwrap();
        assert_eq!(json, r#"{"op":"remove","path":"/area"}"#);
    }

    #[test]
    fn test_requirements_per_kind() {
        assert!(OperationKind::Move.requires_from());
        assert!(!OperationKind::Add.requires_from());
        assert!(OperationKind::Test.requires_value());
        assert!(!OperationKind::Remove.requires_value());
    }
}
