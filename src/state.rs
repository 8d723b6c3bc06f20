use crate::cors::CorsPolicy;
use crate::repository::ItemRepository;
use crate::router::ItemRouter;
use crate::service::ItemService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ItemRouter>,
    pub repository: Arc<dyn ItemRepository>,
}

impl AppState {
    /// Wire the service and router over a repository
    pub fn new(repository: Arc<dyn ItemRepository>, cors: CorsPolicy) -> Self {
        let service = ItemService::new(Arc::clone(&repository));
        Self {
            router: Arc::new(ItemRouter::new(service, cors)),
            repository,
        }
    }
}
