// ============================================================================
// Patch Application Engine
// ============================================================================
//
// Apply: operations → working copy → (all applied | first failure)
//
// The engine never touches the caller's projection. It clones it, applies
// operations strictly in document order and returns the working copy only if
// every operation succeeded. There is no pre-validation pass.
//
// ============================================================================

mod executor;
mod resolver;

pub use resolver::{resolve, Location};

use crate::patch::core::{Composite, OperationRecord, PatchError};

/// Stateless patch engine
#[derive(Debug, Default, Clone, Copy)]
pub struct PatchEngine;

impl PatchEngine {
    pub fn new() -> Self {
        Self
    }

    /// Apply `operations` to a copy of `projection`
    pub fn apply<P>(&self, operations: &[OperationRecord], projection: &P) -> Result<P, PatchError>
    where
        P: Composite + Clone,
    {
        let mut working = projection.clone();

        for (index, record) in operations.iter().enumerate() {
            match executor::execute(&mut working, index, record) {
                Ok(kind) => {
                    tracing::debug!(
                        index = index,
                        op = %kind,
                        path = %record.path,
                        "Applied patch operation"
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        index = index,
                        op = %record.op,
                        path = %error.path,
                        kind = %error.kind,
                        error = %error.source,
                        "Patch operation failed, discarding working copy"
                    );
                    return Err(error);
                }
            }
        }

        Ok(working)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
