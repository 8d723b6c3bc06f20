use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::Item;
use crate::repository::ItemRepository;

/// Item operations for a single owner at a time
///
/// Generates ids and timestamps, then delegates to the repository.
#[derive(Clone)]
pub struct ItemService {
    repo: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(repo: Arc<dyn ItemRepository>) -> Self {
        Self { repo }
    }

    /// Store a new item under a fresh random id
    pub async fn create(&self, user_id: &str, value: &str) -> Result<Item> {
        let item_id = Uuid::new_v4().to_string();
        self.repo.put(user_id, &item_id, value, now_millis()).await
    }

    /// Re-store `item_id` with a new value
    ///
    /// This is an unconditional put: an unknown id is created rather than
    /// rejected, and `created_at` is reset to the update time.
    pub async fn update(&self, user_id: &str, item_id: &str, value: &str) -> Result<Item> {
        self.repo.put(user_id, item_id, value, now_millis()).await
    }

    pub async fn get(&self, user_id: &str, item_id: &str) -> Result<Option<Item>> {
        self.repo.get(user_id, item_id).await
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<Item>> {
        self.repo.list(user_id).await
    }

    pub async fn delete(&self, user_id: &str, item_id: &str) -> Result<()> {
        self.repo.delete(user_id, item_id).await
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryItemRepository;
    use std::collections::HashSet;

    fn service() -> ItemService {
        ItemService::new(Arc::new(InMemoryItemRepository::new()))
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();

        let created = service.create("u1", "hello").await.unwrap();
        assert_eq!(created.user_id, "u1");
        assert_eq!(created.value, "hello");
        assert_eq!(created.created_at, created.updated_at);
        assert!(Uuid::parse_str(&created.item_id).is_ok());

        let fetched = service.get("u1", &created.item_id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_create_generates_unique_ids() {
        let service = service();
        let mut ids = HashSet::new();
        for i in 0..50 {
            let item = service.create("u1", &format!("v{i}")).await.unwrap();
            assert!(ids.insert(item.item_id));
        }
        assert_eq!(service.list("u1").await.unwrap().len(), 50);
    }

    #[tokio::test]
    async fn test_update_existing_item() {
        let service = service();
        let created = service.create("u1", "v1").await.unwrap();

        let updated = service.update("u1", &created.item_id, "v2").await.unwrap();

        assert_eq!(updated.item_id, created.item_id);
        assert_eq!(updated.user_id, "u1");
        assert_eq!(updated.value, "v2");
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(service.get("u1", &created.item_id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_resets_created_at() {
        let repo = Arc::new(InMemoryItemRepository::new());
        repo.put("u1", "old", "v1", 1_000).await.unwrap();
        let service = ItemService::new(repo);

        let updated = service.update("u1", "old", "v2").await.unwrap();

        assert!(updated.created_at > 1_000);
        assert_eq!(updated.created_at, updated.updated_at);
    }

    #[tokio::test]
    async fn test_update_unknown_id_creates_it() {
        let service = service();

        let updated = service.update("u1", "never-created", "v").await.unwrap();

        assert_eq!(updated.item_id, "never-created");
        assert!(service.get("u1", "never-created").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let service = service();
        let created = service.create("u1", "v").await.unwrap();

        service.delete("u1", &created.item_id).await.unwrap();
        service.delete("u1", &created.item_id).await.unwrap();

        assert_eq!(service.get("u1", &created.item_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_returns_live_items_for_owner_only() {
        let service = service();
        let a = service.create("u1", "a").await.unwrap();
        let b = service.create("u1", "b").await.unwrap();
        let gone = service.create("u1", "gone").await.unwrap();
        service.create("u2", "other").await.unwrap();
        service.delete("u1", &gone.item_id).await.unwrap();

        let ids: HashSet<String> = service
            .list("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.item_id)
            .collect();

        assert_eq!(ids, HashSet::from([a.item_id, b.item_id]));
    }
}
