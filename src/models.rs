use serde::{Deserialize, Serialize};

/// A single item owned by a user
///
/// `user_id` + `item_id` is the storage key. Timestamps are epoch millis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    pub user_id: String,
    pub item_id: String,
    pub value: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Response type for the identity probe
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Response type for the list endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ItemListResponse {
    pub items: Vec<Item>,
}

/// Request body accepted by create and update
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ValueBody {
    pub value: String,
}
