use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::properties::{ImagePayload, LocationPatch, LocationPayload};
use crate::models::{Image, Location};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAuctionRequest {
    pub name: String,
    pub description: String,
    pub starting_bid: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: Option<String>,
    pub location: LocationPayload,
    #[serde(default)]
    pub pictures: Vec<ImagePayload>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAuctionRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub starting_bid: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub location: Option<LocationPatch>,
    // Full replace when present, unlike the URL-reconciled property images.
    pub pictures: Option<Vec<ImagePayload>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceBidRequest {
    pub bid_amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuctionDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub starting_bid: f64,
    pub current_bid: Option<f64>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub location: Option<Location>,
    pub pictures: Vec<Image>,
    pub is_wishlisted: bool,
}

#[derive(Serialize, ToSchema)]
pub struct AuctionList {
    pub items: Vec<AuctionDetail>,
}
