// ============================================================================
// House Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HouseError {
    #[error("{0} id must not be nil")]
    NilId(&'static str),

    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid area: {0}")]
    InvalidArea(f64),
}
