use crate::cors::CorsPolicy;
use crate::error::ErrorResponse;
use crate::event::{ApiRequest, ApiResponse};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;

pub const ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const CONTENT_TYPE: &str = "Content-Type";

const ALLOWED_HEADERS: &str = "Authorization,Content-Type";
const ALLOWED_METHODS: &str = "GET,POST,PUT,PATCH,DELETE,OPTIONS";
const JSON_CONTENT_TYPE: &str = "application/json";
const SERIALIZATION_FAILURE: &str = r#"{"error":"serialization"}"#;

/// Builds responses for a single request
///
/// The allow-origin value is resolved once, when the builder is created, and
/// attached to every response it produces.
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    origin: String,
}

impl ResponseBuilder {
    /// Resolve the origin from the request's `Origin` header against the policy
    pub fn for_request(cors: &CorsPolicy, request: Option<&ApiRequest>) -> Self {
        let request_origin = request.and_then(ApiRequest::origin);
        Self {
            origin: cors.resolve(request_origin).to_string(),
        }
    }

    pub fn ok<T: Serialize + ?Sized>(&self, body: &T) -> ApiResponse {
        self.json(200, body)
    }

    pub fn created<T: Serialize + ?Sized>(&self, body: &T) -> ApiResponse {
        self.json(201, body)
    }

    pub fn updated<T: Serialize + ?Sized>(&self, body: &T) -> ApiResponse {
        self.json(200, body)
    }

    pub fn no_content(&self) -> ApiResponse {
        ApiResponse {
            status_code: 204,
            headers: self.cors_headers(),
            body: String::new(),
        }
    }

    pub fn bad_request(&self, message: impl Into<String>) -> ApiResponse {
        self.error(400, message)
    }

    pub fn unauthorized(&self, message: impl Into<String>) -> ApiResponse {
        self.error(401, message)
    }

    pub fn not_found(&self, message: impl Into<String>) -> ApiResponse {
        self.error(404, message)
    }

    pub fn method_not_allowed(&self, message: impl Into<String>) -> ApiResponse {
        self.error(405, message)
    }

    pub fn server_error(&self, message: impl Into<String>) -> ApiResponse {
        self.error(500, message)
    }

    pub fn route_not_found(&self) -> ApiResponse {
        self.not_found("Route not found")
    }

    pub fn item_not_found(&self) -> ApiResponse {
        self.not_found("Not found")
    }

    pub fn invalid_body(&self) -> ApiResponse {
        self.bad_request(r#"Invalid body; expected {"value":"..."}"#)
    }

    pub fn authentication_required(&self) -> ApiResponse {
        self.unauthorized("Authentication required")
    }

    pub fn method_not_supported(&self) -> ApiResponse {
        self.method_not_allowed("Method not allowed")
    }

    pub fn bad_request_from(&self, err: impl Display) -> ApiResponse {
        self.bad_request(format!("Bad request: {err}"))
    }

    /// 500 carrying the fault's message; the text reaches the client verbatim
    pub fn server_error_from(&self, err: impl Display) -> ApiResponse {
        self.server_error(format!("Unexpected error: {err}"))
    }

    /// Pass an already-encoded body through untouched
    pub fn raw(&self, status: u16, body: impl Into<String>) -> ApiResponse {
        self.render(status, body.into())
    }

    /// Serialize `body` as JSON
    pub fn json<T: Serialize + ?Sized>(&self, status: u16, body: &T) -> ApiResponse {
        let encoded = serde_json::to_string(body).unwrap_or_else(|err| {
            tracing::error!("Failed to serialize response body: {}", err);
            SERIALIZATION_FAILURE.to_string()
        });
        self.raw(status, encoded)
    }

    fn error(&self, status: u16, message: impl Into<String>) -> ApiResponse {
        self.json(
            status,
            &ErrorResponse {
                error: message.into(),
            },
        )
    }

    fn render(&self, status: u16, body: String) -> ApiResponse {
        let mut headers = self.cors_headers();
        if !body.is_empty() {
            headers.insert(CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string());
        }
        ApiResponse {
            status_code: status,
            headers,
            body,
        }
    }

    fn cors_headers(&self) -> HashMap<String, String> {
        HashMap::from([
            (ALLOW_ORIGIN.to_string(), self.origin.clone()),
            (ALLOW_HEADERS.to_string(), ALLOWED_HEADERS.to_string()),
            (ALLOW_METHODS.to_string(), ALLOWED_METHODS.to_string()),
        ])
    }
}
