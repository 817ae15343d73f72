use async_trait::async_trait;
use chrono::Utc;
use log::info;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::ItemStore;
use crate::error::InventoryError;
use crate::models::{InventoryItem, ItemFields};
use crate::seed;

/// Process-lifetime store. Data is lost when the instance is dropped.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: RwLock<Vec<InventoryItem>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with the same sample records the database seed inserts.
    pub fn with_samples() -> Self {
        let now = Utc::now();
        let items = seed::sample_items()
            .into_iter()
            .map(|fields| InventoryItem::new(Uuid::new_v4(), fields, now))
            .collect();
        Self {
            items: RwLock::new(items),
        }
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<InventoryItem>, InventoryError> {
        // Newest insertion first, so equal timestamps still come out newest first
        // after the stable sort.
        let mut items: Vec<InventoryItem> = self.items.read().await.iter().rev().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn get(&self, id: Uuid) -> Result<InventoryItem, InventoryError> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(InventoryError::NotFound)
    }

    async fn create(&self, fields: ItemFields) -> Result<InventoryItem, InventoryError> {
        let item = InventoryItem::new(Uuid::new_v4(), fields, Utc::now());
        self.items.write().await.push(item.clone());
        info!("Item creado en memoria: {}", item.id);
        Ok(item)
    }

    async fn update(&self, id: Uuid, fields: ItemFields) -> Result<InventoryItem, InventoryError> {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(InventoryError::NotFound)?;
        item.apply(fields, Utc::now());
        Ok(item.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<InventoryItem, InventoryError> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or(InventoryError::NotFound)?;
        Ok(items.remove(index))
    }

    fn describe(&self) -> String {
        "In-Memory Storage".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> ItemFields {
        ItemFields {
            name: name.to_string(),
            description: "desc".to_string(),
            quantity: 1,
            price: 2.5,
            category: "Misc".to_string(),
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamps() {
        let store = InMemoryStore::new();
        let item = store.create(fields("Widget")).await.unwrap();
        assert_eq!(item.created_at, item.updated_at);
        assert_eq!(store.get(item.id).await.unwrap(), item);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = InMemoryStore::new();
        let first = store.create(fields("first")).await.unwrap();
        let second = store.create(fields("second")).await.unwrap();
        let third = store.create(fields("third")).await.unwrap();

        let ids: Vec<Uuid> = store.list().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn update_keeps_identity_and_created_at() {
        let store = InMemoryStore::new();
        let item = store.create(fields("Widget")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let updated = store
            .update(item.id, ItemFields { quantity: 20, ..fields("Gadget") })
            .await
            .unwrap();
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.created_at, item.created_at);
        assert!(updated.updated_at > item.updated_at);
        assert_eq!(updated.name, "Gadget");
        assert_eq!(updated.quantity, 20);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = InMemoryStore::new();
        store.create(fields("Widget")).await.unwrap();
        let ghost = Uuid::new_v4();

        assert!(matches!(store.get(ghost).await, Err(InventoryError::NotFound)));
        assert!(matches!(
            store.update(ghost, fields("x")).await,
            Err(InventoryError::NotFound)
        ));
        assert!(matches!(store.delete(ghost).await, Err(InventoryError::NotFound)));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_returns_removed_item() {
        let store = InMemoryStore::new();
        let keep = store.create(fields("keep")).await.unwrap();
        let gone = store.create(fields("gone")).await.unwrap();

        assert_eq!(store.delete(gone.id).await.unwrap(), gone);
        assert_eq!(store.list().await.unwrap(), vec![keep]);
    }

    #[tokio::test]
    async fn samples_are_loaded() {
        let store = InMemoryStore::with_samples();
        assert_eq!(store.list().await.unwrap().len(), seed::sample_items().len());
    }
}
