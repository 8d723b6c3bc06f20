//! HTTP-shaped event types exchanged with the router.
//!
//! `ApiRequest` follows the API Gateway proxy event layout so a raw event
//! deserializes straight into it. Every field is optional; the router decides
//! what a missing field means.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Inbound request event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub http_method: Option<String>,
    pub path: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<String>,
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestContext {
    pub authorizer: Option<Authorizer>,
}

/// Authorizer output attached by the gateway
///
/// REST APIs with a Cognito authorizer put the token claims under `claims`;
/// HTTP APIs with a JWT authorizer nest them under `jwt.claims`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authorizer {
    pub claims: Option<HashMap<String, JsonValue>>,
    pub jwt: Option<JwtAuthorizer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwtAuthorizer {
    pub claims: Option<HashMap<String, JsonValue>>,
}

impl ApiRequest {
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            http_method: Some(method.to_string()),
            path: Some(path.to_string()),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_claims(mut self, claims: HashMap<String, JsonValue>) -> Self {
        self.request_context = Some(RequestContext {
            authorizer: Some(Authorizer {
                claims: Some(claims),
                jwt: None,
            }),
        });
        self
    }

    /// Value of the `Origin` header, matched case-insensitively
    pub fn origin(&self) -> Option<&str> {
        self.headers.as_ref().and_then(|headers| {
            headers
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case("origin"))
                .map(|(_, value)| value.as_str())
        })
    }
}

/// Outbound response event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_rest_proxy_event() {
        let raw = json!({
            "httpMethod": "POST",
            "path": "/v1/items",
            "headers": { "origin": "http://localhost:5173" },
            "body": "{\"value\":\"hello\"}",
            "requestContext": {
                "authorizer": { "claims": { "sub": "u1", "email": "u1@example.com" } }
            }
        });

        let request: ApiRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(request.http_method.as_deref(), Some("POST"));
        assert_eq!(request.path.as_deref(), Some("/v1/items"));
        assert_eq!(request.origin(), Some("http://localhost:5173"));

        let claims = request
            .request_context
            .and_then(|c| c.authorizer)
            .and_then(|a| a.claims)
            .unwrap();
        assert_eq!(claims["sub"], json!("u1"));
    }

    #[test]
    fn test_deserialize_http_api_jwt_event() {
        let raw = json!({
            "httpMethod": "GET",
            "path": "/v1/me",
            "requestContext": {
                "authorizer": { "jwt": { "claims": { "sub": "u2" } } }
            }
        });

        let request: ApiRequest = serde_json::from_value(raw).unwrap();
        let claims = request
            .request_context
            .and_then(|c| c.authorizer)
            .and_then(|a| a.jwt)
            .and_then(|j| j.claims)
            .unwrap();
        assert_eq!(claims["sub"], json!("u2"));
    }

    #[test]
    fn test_deserialize_empty_event() {
        let request: ApiRequest = serde_json::from_str("{}").unwrap();
        assert!(request.http_method.is_none());
        assert!(request.path.is_none());
        assert!(request.origin().is_none());
    }

    #[test]
    fn test_origin_header_is_case_insensitive() {
        let request = ApiRequest::new("GET", "/v1/me").with_header("ORIGIN", "https://app.example");
        assert_eq!(request.origin(), Some("https://app.example"));
    }

    #[test]
    fn test_response_serializes_gateway_shape() {
        let response = ApiResponse {
            status_code: 204,
            headers: HashMap::new(),
            body: String::new(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 204);
        assert_eq!(json["body"], "");
    }
}
