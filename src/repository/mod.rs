//! Item storage.
//!
//! Items live in a single table keyed by `(user_id, item_id)`. Writes are
//! unconditional upserts and deletes are idempotent; concurrent writers to
//! the same key are last-writer-wins.

pub mod memory;
pub mod spanner;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Item;

pub use memory::InMemoryItemRepository;
pub use spanner::SpannerItemRepository;

#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Write the item, replacing any record under the same key
    ///
    /// Both timestamps are set to `now`.
    async fn put(&self, user_id: &str, item_id: &str, value: &str, now: i64) -> Result<Item>;

    /// Point lookup; a missing item is `Ok(None)`
    async fn get(&self, user_id: &str, item_id: &str) -> Result<Option<Item>>;

    /// Every item under `user_id`, in store order
    async fn list(&self, user_id: &str) -> Result<Vec<Item>>;

    /// Remove the item; removing a missing item succeeds
    async fn delete(&self, user_id: &str, item_id: &str) -> Result<()>;

    /// Verify the store is reachable
    async fn health_check(&self) -> Result<()>;
}
