// ============================================================================
// House Domain - Aggregate, Projection and Use Cases
// ============================================================================
//
// This module contains ALL House-specific code:
// - Value objects (Address, Room)
// - Documents (HouseUpdate, HouseRequest, HouseListItem)
// - Errors (HouseError enum)
// - Aggregate (House with its creation invariants)
// - Projection (HousePatch, the shape patch documents are applied to)
// - Service (HouseService orchestrating the update use cases)
//
// The generic patch engine lives in `crate::patch` and knows nothing about
// houses.
//
// ============================================================================

pub mod value_objects;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod projection;
pub mod service;

// Re-export for convenience
pub use value_objects::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
pub use projection::*;
pub use service::*;
