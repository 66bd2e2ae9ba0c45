use serde::{Deserialize, Serialize};
use std::fmt;

use super::node::CoercionError;
use super::operation::UnknownOperationKind;
use super::path::PointerSyntaxError;
use super::value::PatchValue;

// ============================================================================
// Patch Engine Errors
// ============================================================================
//
// Every failure raised while resolving or executing an operation belongs to
// exactly one of four kinds. Callers only ever branch on the kind; the
// detailed failure is kept as the error source for logs.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchErrorKind {
    /// Malformed path syntax, unknown operation kind, missing operands
    Structural,
    /// Path does not resolve against the projection
    Unresolvable,
    /// Supplied value cannot be coerced into the target's declared type
    TypeMismatch,
    /// A `test` comparison did not hold
    PreconditionFailed,
}

impl PatchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchErrorKind::Structural => "structural",
            PatchErrorKind::Unresolvable => "unresolvable",
            PatchErrorKind::TypeMismatch => "type-mismatch",
            PatchErrorKind::PreconditionFailed => "precondition-failed",
        }
    }
}

impl fmt::Display for PatchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detailed failure of a single operation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApplyFailure {
    #[error(transparent)]
    MalformedPath(#[from] PointerSyntaxError),

    #[error(transparent)]
    UnknownOperation(#[from] UnknownOperationKind),

    #[error("operation '{0}' requires a 'from' path")]
    MissingFrom(&'static str),

    #[error("operation '{0}' requires a value")]
    MissingValue(&'static str),

    #[error("the document root cannot be {0}")]
    RootTarget(&'static str),

    #[error("{type_label} has no member '{member}'")]
    UnknownMember {
        type_label: &'static str,
        member: String,
    },

    #[error("member '{0}' is absent and cannot be traversed or replaced")]
    AbsentComposite(String),

    #[error("cannot traverse into scalar member '{0}'")]
    NotTraversable(String),

    #[error("'{0}' is not a sequence position")]
    NotAPosition(String),

    #[error("index {index} is out of range for a sequence of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("the append position '-' does not address an existing element")]
    AppendNotAnElement,

    #[error(transparent)]
    TypeMismatch(#[from] CoercionError),

    #[error("test failed: expected {expected:?}, found {actual:?}")]
    TestFailed {
        expected: PatchValue,
        actual: PatchValue,
    },
}

impl ApplyFailure {
    pub fn kind(&self) -> PatchErrorKind {
        match self {
            ApplyFailure::MalformedPath(_)
            | ApplyFailure::UnknownOperation(_)
            | ApplyFailure::MissingFrom(_)
            | ApplyFailure::MissingValue(_) => PatchErrorKind::Structural,
            ApplyFailure::RootTarget(_)
            | ApplyFailure::UnknownMember { .. }
            | ApplyFailure::AbsentComposite(_)
            | ApplyFailure::NotTraversable(_)
            | ApplyFailure::NotAPosition(_)
            | ApplyFailure::IndexOutOfRange { .. }
            | ApplyFailure::AppendNotAnElement => PatchErrorKind::Unresolvable,
            ApplyFailure::TypeMismatch(_) => PatchErrorKind::TypeMismatch,
            ApplyFailure::TestFailed { .. } => PatchErrorKind::PreconditionFailed,
        }
    }
}

/// Error returned by the engine: which operation failed, where, and why
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} error in operation #{index} ({op} {path}): {source}")]
pub struct PatchError {
    pub kind: PatchErrorKind,
    /// Zero-based position of the operation in the document
    pub index: usize,
    pub op: String,
    /// The path that triggered the failure (may be the `from` path)
    pub path: String,
    #[source]
    pub source: ApplyFailure,
}

impl PatchError {
    pub fn new(index: usize, op: &str, path: &str, source: ApplyFailure) -> Self {
        Self {
            kind: source.kind(),
            index,
            op: op.to_string(),
            path: path.to_string(),
            source,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds() {
        assert_eq!(
            ApplyFailure::UnknownOperation(UnknownOperationKind("merge".into())).kind(),
            PatchErrorKind::Structural
        );
        assert_eq!(
            ApplyFailure::IndexOutOfRange { index: 3, len: 1 }.kind(),
            PatchErrorKind::Unresolvable
        );
        assert_eq!(
            ApplyFailure::TypeMismatch(CoercionError {
                expected: "number",
                found: "text"
            })
            .kind(),
            PatchErrorKind::TypeMismatch
        );
        assert_eq!(
            ApplyFailure::TestFailed {
                expected: PatchValue::Null,
                actual: PatchValue::Number(1.0),
            }
            .kind(),
            PatchErrorKind::PreconditionFailed
        );
    }

    #[test]
    fn test_patch_error_message() {
        let err = PatchError::new(
            1,
            "replace",
            "/address/street",
            ApplyFailure::AbsentComposite("address".into()),
        );

        assert_eq!(err.kind, PatchErrorKind::Unresolvable);
        assert_eq!(
            err.to_string(),
            "unresolvable error in operation #1 (replace /address/street): \
             member 'address' is absent and cannot be traversed or replaced"
        );
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&PatchErrorKind::PreconditionFailed).unwrap();
        assert_eq!(json, r#""precondition-failed""#);
    }
}
