use super::item::{Item, NewItem};
use anyhow::Result;
use std::sync::Arc;

/// Abstraction for item persistence.
#[async_trait::async_trait]
pub trait ItemRepository: Send + Sync {
    // ---
    /// Insert a new item and return the stored row.
    async fn create_item(&self, new_item: NewItem) -> Result<Item>;

    /// List all items, ordered by id.
    async fn list_items(&self) -> Result<Vec<Item>>;

    /// Fetch a single item by id.
    async fn get_item(&self, item_id: i32) -> Result<Option<Item>>;

    /// Delete an item by id. Returns false when no row existed.
    async fn delete_item(&self, item_id: i32) -> Result<bool>;

    /// Round-trip a trivial query to verify the store is reachable.
    /// Used by the readiness probe.
    async fn ping(&self) -> Result<()>;
}

/// Type alias for any backend that implements ItemRepository.
pub type RepositoryPtr = Arc<dyn ItemRepository>;
