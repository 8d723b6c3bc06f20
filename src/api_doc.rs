use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{Item, ItemListResponse, MeResponse, ValueBody};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "user-items API",
        version = "1.0.0",
        description = "Per-user item storage with a bearer-token identity"
    ),
    paths(
        handlers::health::health_handler,
        handlers::me::me_handler,
        handlers::items::create_handler,
        handlers::items::list_handler,
        handlers::items::get_handler,
        handlers::items::update_handler,
        handlers::items::delete_handler
    ),
    components(
        schemas(
            Item,
            ItemListResponse,
            MeResponse,
            ValueBody,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "identity", description = "Caller identity"),
        (name = "items", description = "Item operations scoped to the caller")
    )
)]
pub struct ApiDoc;
