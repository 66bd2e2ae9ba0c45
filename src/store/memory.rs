use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::HouseStore;
use crate::domain::house::House;

// ============================================================================
// In-Memory House Store
// ============================================================================

/// Insertion-ordered store guarded by a `RwLock`
#[derive(Debug, Default)]
pub struct InMemoryHouseStore {
    houses: RwLock<Vec<House>>,
    persist_calls: AtomicUsize,
}

impl InMemoryHouseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_houses(houses: Vec<House>) -> Self {
        Self {
            houses: RwLock::new(houses),
            persist_calls: AtomicUsize::new(0),
        }
    }

    /// Number of successful `persist` calls so far
    pub fn persist_count(&self) -> usize {
        self.persist_calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.houses.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.houses.read().await.is_empty()
    }
}

#[async_trait]
impl HouseStore for InMemoryHouseStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<House>> {
        let houses = self.houses.read().await;
        Ok(houses.iter().find(|h| h.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<House>> {
        Ok(self.houses.read().await.clone())
    }

    async fn persist(&self, house: &House) -> Result<()> {
        let mut houses = self.houses.write().await;
        let Some(slot) = houses.iter_mut().find(|h| h.id == house.id) else {
            bail!("House {} is not stored and cannot be persisted", house.id);
        };

        *slot = house.clone();
        self.persist_calls.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(house_id = %house.id, "Persisted house");
        Ok(())
    }

    async fn insert(&self, house: &House) -> Result<()> {
        let mut houses = self.houses.write().await;
        if houses.iter().any(|h| h.id == house.id) {
            bail!("House {} already exists", house.id);
        }

        houses.push(house.clone());
        tracing::debug!(house_id = %house.id, "Inserted house");
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<bool> {
        let mut houses = self.houses.write().await;
        let before = houses.len();
        houses.retain(|h| h.id != id);
        Ok(houses.len() != before)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn house(name: &str) -> House {
        House::create(Uuid::new_v4(), name, "Red", 25.0, None, vec![]).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = InMemoryHouseStore::new();
        let first = house("First House");
        store.insert(&first).await.unwrap();

        assert_eq!(store.find_by_id(first.id).await.unwrap(), Some(first));
        assert_eq!(store.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_duplicate_fails() {
        let store = InMemoryHouseStore::new();
        let first = house("First House");
        store.insert(&first).await.unwrap();

        assert!(store.insert(&first).await.is_err());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_persist_overwrites_and_counts() {
        let mut first = house("First House");
        let store = InMemoryHouseStore::with_houses(vec![first.clone()]);

        first.name = "Renamed".to_string();
        store.persist(&first).await.unwrap();

        assert_eq!(store.persist_count(), 1);
        assert_eq!(store.find_by_id(first.id).await.unwrap().unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn test_persist_unknown_house_fails() {
        let store = InMemoryHouseStore::new();
        assert!(store.persist(&house("Ghost")).await.is_err());
        assert_eq!(store.persist_count(), 0);
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = InMemoryHouseStore::new();
        for name in ["A", "B", "C"] {
            store.insert(&house(name)).await.unwrap();
        }

        let names: Vec<_> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_remove() {
        let first = house("First House");
        let store = InMemoryHouseStore::with_houses(vec![first.clone()]);

        assert!(store.remove(first.id).await.unwrap());
        assert!(!store.remove(first.id).await.unwrap());
        assert!(store.is_empty().await);
    }
}
