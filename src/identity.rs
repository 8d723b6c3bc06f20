use crate::event::ApiRequest;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Identity used when no subject claim is present
pub const ANONYMOUS: &str = "anonymous";

/// Resolve the caller's user id from the authorizer claims
///
/// Looks at `authorizer.claims.sub` first, then `authorizer.jwt.claims.sub`.
/// Missing, non-string, or blank subjects resolve to [`ANONYMOUS`].
pub fn extract_user_id(request: &ApiRequest) -> String {
    let authorizer = request
        .request_context
        .as_ref()
        .and_then(|context| context.authorizer.as_ref());

    let Some(authorizer) = authorizer else {
        return ANONYMOUS.to_string();
    };

    subject(authorizer.claims.as_ref())
        .or_else(|| subject(authorizer.jwt.as_ref().and_then(|jwt| jwt.claims.as_ref())))
        .unwrap_or(ANONYMOUS)
        .to_string()
}

pub fn is_anonymous(user_id: &str) -> bool {
    user_id == ANONYMOUS
}

fn subject(claims: Option<&HashMap<String, JsonValue>>) -> Option<&str> {
    claims?
        .get("sub")?
        .as_str()
        .filter(|sub| !sub.trim().is_empty())
}
