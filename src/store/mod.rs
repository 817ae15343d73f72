mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgItemStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::InventoryError;
use crate::models::{InventoryItem, ItemFields};

/// Persistence for inventory items. Implementations must behave identically; the
/// only observable difference is what `describe` reports.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items, newest `created_at` first.
    async fn list(&self) -> Result<Vec<InventoryItem>, InventoryError>;

    async fn get(&self, id: Uuid) -> Result<InventoryItem, InventoryError>;

    async fn create(&self, fields: ItemFields) -> Result<InventoryItem, InventoryError>;

    /// Overwrites the business fields unconditionally; last write wins.
    async fn update(&self, id: Uuid, fields: ItemFields) -> Result<InventoryItem, InventoryError>;

    /// Removes the item and hands it back.
    async fn delete(&self, id: Uuid) -> Result<InventoryItem, InventoryError>;

    /// Storage mode shown by the health endpoint.
    fn describe(&self) -> String;
}
