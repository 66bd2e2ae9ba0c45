// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with:
// - Value objects
// - Commands and documents
// - Errors
// - Aggregate implementation
// - Use case service
//
// ============================================================================

pub mod house;
