use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::properties::ImagePayload;
use crate::models::Image;

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkCreateImagesRequest {
    pub property_id: Uuid,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
}

#[derive(Serialize, ToSchema)]
pub struct ImageList {
    pub items: Vec<Image>,
}
