use crate::event::ApiResponse;
use crate::models::MeResponse;
use crate::response::ResponseBuilder;
use crate::routes;

/// GET /v1/me - Report the caller's identity
///
/// Needs no authentication; callers without a subject claim get `anonymous`.
#[utoipa::path(
    get,
    path = routes::ME,
    responses(
        (status = 200, description = "Resolved identity", body = MeResponse)
    ),
    tag = "identity"
)]
pub fn me_handler(user_id: &str, response: &ResponseBuilder) -> ApiResponse {
    tracing::debug!("Identity probe for user: {}", user_id);
    response.ok(&MeResponse {
        user_id: user_id.to_string(),
    })
}
