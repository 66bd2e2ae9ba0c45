// ============================================================================
// Patch Core - Generic Building Blocks
// ============================================================================
//
// Values, pointers, operations, errors and the node model. Nothing in here
// knows about houses; any projection implementing `Composite` can be patched.
//
// ============================================================================

pub mod error;
pub mod node;
pub mod operation;
pub mod path;
pub mod value;

// Re-export core types for convenience
pub use error::{ApplyFailure, PatchError, PatchErrorKind};
pub use node::{
    coerce_composite, composite_to_value, CoercionError, Composite, FieldType, Member, NodeMut,
    Sequence, Shape,
};
pub use operation::{OperationKind, OperationRecord, PatchDocument, UnknownOperationKind};
pub use path::{Pointer, PointerSyntaxError, Position, Step};
pub use value::PatchValue;
