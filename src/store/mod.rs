use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::house::House;

// ============================================================================
// House Store - Persistence Port
// ============================================================================
//
// The use cases only ever talk to this trait. Any failure coming out of an
// adapter is unexpected from the caller's point of view and travels as an
// `anyhow::Error`.
//
// ============================================================================

pub mod memory;
pub mod seed;

pub use memory::InMemoryHouseStore;
pub use seed::seeded_houses;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseStore: Send + Sync {
    /// Load a house with its address and rooms
    async fn find_by_id(&self, id: Uuid) -> Result<Option<House>>;

    async fn find_all(&self) -> Result<Vec<House>>;

    /// Write back an already stored house
    async fn persist(&self, house: &House) -> Result<()>;

    async fn insert(&self, house: &House) -> Result<()>;

    /// Returns `false` when nothing was stored under `id`
    async fn remove(&self, id: Uuid) -> Result<bool>;
}
