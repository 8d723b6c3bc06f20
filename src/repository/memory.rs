use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::ItemRepository;
use crate::models::Item;

type ItemKey = (String, String);

/// In-memory item store for local development and tests
///
/// Data is not persisted and is lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Arc<RwLock<HashMap<ItemKey, Item>>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn put(&self, user_id: &str, item_id: &str, value: &str, now: i64) -> Result<Item> {
        let item = Item {
            user_id: user_id.to_string(),
            item_id: item_id.to_string(),
            value: value.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.items
            .write()
            .await
            .insert((item.user_id.clone(), item.item_id.clone()), item.clone());

        tracing::debug!("Put item {} for user {}", item_id, user_id);
        Ok(item)
    }

    async fn get(&self, user_id: &str, item_id: &str) -> Result<Option<Item>> {
        let items = self.items.read().await;
        Ok(items
            .get(&(user_id.to_string(), item_id.to_string()))
            .cloned())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        let mut owned: Vec<Item> = items
            .values()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();
        // Match the sort-key order a real table returns.
        owned.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        Ok(owned)
    }

    async fn delete(&self, user_id: &str, item_id: &str) -> Result<()> {
        self.items
            .write()
            .await
            .remove(&(user_id.to_string(), item_id.to_string()));
        tracing::debug!("Deleted item {} for user {}", item_id, user_id);
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
