use crate::cors::CorsPolicy;
use crate::error::RouteError;
use crate::event::{ApiRequest, ApiResponse};
use crate::handlers;
use crate::identity::{extract_user_id, is_anonymous};
use crate::response::ResponseBuilder;
use crate::routes::{HttpMethod, ItemsTarget, Route};
use crate::service::ItemService;

/// Maps a request event to an item operation and renders the outcome
///
/// Stateless per request. Every outcome, including storage faults, comes
/// back as a response; `handle` never fails.
pub struct ItemRouter {
    service: ItemService,
    cors: CorsPolicy,
}

impl ItemRouter {
    pub fn new(service: ItemService, cors: CorsPolicy) -> Self {
        Self { service, cors }
    }

    pub async fn handle(&self, request: Option<&ApiRequest>) -> ApiResponse {
        let response = ResponseBuilder::for_request(&self.cors, request);

        let Some(request) = request else {
            tracing::warn!("Rejected empty request event");
            return RouteError::BadRequest("Request cannot be null".to_string())
                .into_response(&response);
        };

        let method = request.http_method.as_deref().unwrap_or("GET");
        // Preflight is answered before the path or identity are looked at.
        if method == "OPTIONS" {
            return response.no_content();
        }

        let path = request.path.as_deref().unwrap_or("");

        match self.dispatch(request, method, path, &response).await {
            Ok(result) => {
                tracing::info!("{} {} -> {}", method, path, result.status_code);
                result
            }
            Err(RouteError::Unexpected(err)) => {
                tracing::error!("{} {} failed: {:#}", method, path, err);
                RouteError::Unexpected(err).into_response(&response)
            }
            Err(err) => {
                tracing::info!("{} {} -> {} ({})", method, path, err.status(), err);
                err.into_response(&response)
            }
        }
    }

    async fn dispatch(
        &self,
        request: &ApiRequest,
        method: &str,
        path: &str,
        response: &ResponseBuilder,
    ) -> Result<ApiResponse, RouteError> {
        let method: HttpMethod = method.parse().map_err(RouteError::BadRequest)?;
        let user_id = extract_user_id(request);

        if Route::Me.matches(path) {
            return Ok(handlers::me_handler(&user_id, response));
        }

        if !Route::Items.is_prefix_of(path) {
            return Err(RouteError::RouteNotFound);
        }

        if is_anonymous(&user_id) {
            return Err(RouteError::Unauthenticated);
        }

        let service = &self.service;
        let body = request.body.as_deref();

        match (ItemsTarget::parse(path), method) {
            (ItemsTarget::Collection, HttpMethod::Post) => {
                handlers::create_handler(service, &user_id, body, response).await
            }
            (ItemsTarget::Collection, HttpMethod::Get) => {
                handlers::list_handler(service, &user_id, response).await
            }
            (ItemsTarget::Item(item_id), HttpMethod::Get) => {
                handlers::get_handler(service, &user_id, item_id, response).await
            }
            (ItemsTarget::Item(item_id), HttpMethod::Put) => {
                handlers::update_handler(service, &user_id, item_id, body, response).await
            }
            (ItemsTarget::Item(item_id), HttpMethod::Delete) => {
                handlers::delete_handler(service, &user_id, item_id, response).await
            }
            (ItemsTarget::Collection | ItemsTarget::Item(_), _) => {
                Err(RouteError::MethodNotAllowed)
            }
            (ItemsTarget::Unknown, _) => Err(RouteError::RouteNotFound),
        }
    }
}
