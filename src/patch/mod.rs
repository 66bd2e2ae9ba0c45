// ============================================================================
// Patch Infrastructure
// ============================================================================
//
// Generic, reusable patch application. Domain-specific projections live in
// src/domain/.
//
// ============================================================================

mod core;
mod engine;

pub use self::core::*;
pub use self::engine::*;
