//! Item operations behind `/v1/items`.
//!
//! The router has already checked that the caller is authenticated and that
//! the method fits the path; these functions only do the work.

use crate::body::extract_value;
use crate::error::{ErrorResponse, RouteError};
use crate::event::ApiResponse;
use crate::models::{Item, ItemListResponse, ValueBody};
use crate::response::ResponseBuilder;
use crate::routes;
use crate::service::ItemService;

/// POST /v1/items handler - Create an item
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body = ValueBody,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Body has no usable value", body = ErrorResponse),
        (status = 401, description = "No identity", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_handler(
    service: &ItemService,
    user_id: &str,
    body: Option<&str>,
    response: &ResponseBuilder,
) -> Result<ApiResponse, RouteError> {
    let value = extract_value(body).ok_or(RouteError::InvalidBody)?;

    let item = service.create(user_id, &value).await?;

    tracing::info!("Created item {} for user {}", item.item_id, user_id);
    Ok(response.created(&item))
}

/// GET /v1/items handler - List the caller's items
///
/// Unpaginated; returns everything under the caller's partition.
#[utoipa::path(
    get,
    path = routes::ITEMS,
    responses(
        (status = 200, description = "All items owned by the caller", body = ItemListResponse),
        (status = 401, description = "No identity", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_handler(
    service: &ItemService,
    user_id: &str,
    response: &ResponseBuilder,
) -> Result<ApiResponse, RouteError> {
    let items = service.list(user_id).await?;

    tracing::info!("Listed {} items for user {}", items.len(), user_id);
    Ok(response.ok(&ItemListResponse { items }))
}

/// GET /v1/items/{id} handler - Fetch one item
#[utoipa::path(
    get,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 401, description = "No identity", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_handler(
    service: &ItemService,
    user_id: &str,
    item_id: &str,
    response: &ResponseBuilder,
) -> Result<ApiResponse, RouteError> {
    match service.get(user_id, item_id).await? {
        Some(item) => {
            tracing::info!("Retrieved item {} for user {}", item_id, user_id);
            Ok(response.ok(&item))
        }
        None => {
            tracing::info!("Item {} not found for user {}", item_id, user_id);
            Err(RouteError::ItemNotFound)
        }
    }
}

/// PUT /v1/items/{id} handler - Replace an item's value
///
/// Behaves as an upsert: an unknown id is created, and `created_at` is reset.
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "Item id")
    ),
    request_body = ValueBody,
    responses(
        (status = 200, description = "Item stored", body = Item),
        (status = 400, description = "Body has no usable value", body = ErrorResponse),
        (status = 401, description = "No identity", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_handler(
    service: &ItemService,
    user_id: &str,
    item_id: &str,
    body: Option<&str>,
    response: &ResponseBuilder,
) -> Result<ApiResponse, RouteError> {
    let value = extract_value(body).ok_or(RouteError::InvalidBody)?;

    let item = service.update(user_id, item_id, &value).await?;

    tracing::info!("Updated item {} for user {}", item_id, user_id);
    Ok(response.updated(&item))
}

/// DELETE /v1/items/{id} handler - Remove an item
///
/// Idempotent; deleting a missing item still answers 204.
#[utoipa::path(
    delete,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "Item id")
    ),
    responses(
        (status = 204, description = "Item removed (or never existed)"),
        (status = 401, description = "No identity", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_handler(
    service: &ItemService,
    user_id: &str,
    item_id: &str,
    response: &ResponseBuilder,
) -> Result<ApiResponse, RouteError> {
    service.delete(user_id, item_id).await?;

    tracing::info!("Deleted item {} for user {}", item_id, user_id);
    Ok(response.no_content())
}
