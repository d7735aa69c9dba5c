use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::auctions::AuctionDetail;
use crate::dto::properties::PropertyDetail;

fn default_true() -> bool {
    true
}

/// `is_wishlisted` is the desired membership state, not the current one;
/// `is_property` selects which collection `item_id` refers to.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddWishlistItemRequest {
    pub item_id: Uuid,
    #[serde(default = "default_true")]
    pub is_wishlisted: bool,
    #[serde(default = "default_true")]
    pub is_property: bool,
}

#[derive(Serialize, ToSchema)]
pub struct WishlistDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub properties: Vec<PropertyDetail>,
    pub auctions: Vec<AuctionDetail>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
