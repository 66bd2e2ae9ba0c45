// ============================================================================
// house_patch - Partial updates for House aggregates
// ============================================================================
//
// - `patch`: generic patch documents and the engine that applies them
// - `domain`: the House aggregate, its projection and use cases
// - `store`: persistence port and the in-memory adapter
// - `config`, `metrics`: service configuration and Prometheus counters
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod metrics;
pub mod patch;
pub mod store;
