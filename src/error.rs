use crate::event::ApiResponse;
use crate::response::ResponseBuilder;
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Failure outcomes of a routed request
///
/// Every variant maps to exactly one response; nothing escapes the router.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Body is missing or has no usable `value`
    #[error("invalid body")]
    InvalidBody,
    /// Items route called without an identity
    #[error("authentication required")]
    Unauthenticated,
    /// No item under the requested key
    #[error("item not found")]
    ItemNotFound,
    /// Path matches no route
    #[error("route not found")]
    RouteNotFound,
    /// Route exists but not for this method
    #[error("method not allowed")]
    MethodNotAllowed,
    /// Malformed request shape, e.g. an unknown method token
    #[error("{0}")]
    BadRequest(String),
    /// Anything else, usually a storage fault
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl RouteError {
    pub fn status(&self) -> u16 {
        match self {
            RouteError::InvalidBody | RouteError::BadRequest(_) => 400,
            RouteError::Unauthenticated => 401,
            RouteError::ItemNotFound | RouteError::RouteNotFound => 404,
            RouteError::MethodNotAllowed => 405,
            RouteError::Unexpected(_) => 500,
        }
    }

    pub fn into_response(self, response: &ResponseBuilder) -> ApiResponse {
        match self {
            RouteError::InvalidBody => response.invalid_body(),
            RouteError::Unauthenticated => response.authentication_required(),
            RouteError::ItemNotFound => response.item_not_found(),
            RouteError::RouteNotFound => response.route_not_found(),
            RouteError::MethodNotAllowed => response.method_not_supported(),
            RouteError::BadRequest(msg) => response.bad_request_from(msg),
            // The fault's message goes to the client as-is.
            RouteError::Unexpected(err) => response.server_error_from(format!("{err:#}")),
        }
    }
}
