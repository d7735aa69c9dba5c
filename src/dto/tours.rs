use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Tour;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RequestTourRequest {
    pub item_id: Uuid,
    pub date: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct TourList {
    pub items: Vec<Tour>,
}
