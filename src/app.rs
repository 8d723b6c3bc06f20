use axum::{
    Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::auth::claims_from_headers;
use crate::event::{ApiRequest, ApiResponse};
use crate::handlers::health_handler;
use crate::routes;
use crate::state::AppState;

/// Build the HTTP application
///
/// `GET` on health and the API docs is served directly. Every other request,
/// including other methods on those paths, is turned into an [`ApiRequest`]
/// and handed to the item router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, get(health_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .method_not_allowed_fallback(dispatch_handler)
        .fallback(dispatch_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = to_api_request(&method, &uri, &headers, &body);
    let result = state.router.handle(Some(&request)).await;
    into_http_response(result)
}

fn to_api_request(method: &Method, uri: &Uri, headers: &HeaderMap, body: &Bytes) -> ApiRequest {
    let mut request = ApiRequest::new(method.as_str(), uri.path());

    for (name, value) in headers {
        if let Ok(value) = value.to_str() {
            request = request.with_header(name.as_str(), value);
        }
    }

    if !body.is_empty() {
        request = request.with_body(String::from_utf8_lossy(body));
    }

    if let Some(claims) = claims_from_headers(headers) {
        request = request.with_claims(claims);
    }

    request
}

fn into_http_response(response: ApiResponse) -> Response {
    let mut builder = Response::builder().status(response.status_code);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    match builder.body(Body::from(response.body)) {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Failed to build HTTP response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
