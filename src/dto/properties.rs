use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Amenities, Image, Loaner, Location, PropertyKind};

#[derive(Debug, Deserialize, ToSchema)]
pub struct LocationPayload {
    pub name: String,
    pub longitude: Decimal,
    pub latitude: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub longitude: Option<Decimal>,
    pub latitude: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AmenitiesPayload {
    pub bedroom: i32,
    pub bathroom: i32,
    pub area: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AmenitiesPatch {
    pub bedroom: Option<i32>,
    pub bathroom: Option<i32>,
    pub area: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ImagePayload {
    pub image_url: String,
    pub is_cover: Option<bool>,
    pub blur_hash: Option<String>,
}

/// Loaner reference by name; logo/real_state_provided are defaults used only
/// when the name is not known yet. `description` lands on the link row.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoanerPayload {
    pub name: String,
    pub logo: Option<String>,
    pub real_state_provided: Option<bool>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePropertyRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: Option<String>,
    pub discount: Option<f64>,
    #[serde(default)]
    pub is_store: bool,
    #[serde(rename = "type")]
    pub kind: Option<PropertyKind>,
    pub move_in_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rental: bool,
    pub location: LocationPayload,
    // Required: a property without amenities must fail before any write.
    pub amenities: AmenitiesPayload,
    #[serde(default)]
    pub pictures: Vec<ImagePayload>,
    #[serde(default)]
    pub loaners: Vec<LoanerPayload>,
}

/// Every section is independently optional; only sections present are touched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePropertyRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub discount: Option<f64>,
    pub sold_out: Option<bool>,
    pub is_store: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<PropertyKind>,
    pub move_in_date: Option<DateTime<Utc>>,
    pub rental: Option<bool>,
    pub location: Option<LocationPatch>,
    pub amenities: Option<AmenitiesPatch>,
    pub pictures: Option<Vec<ImagePayload>>,
    pub loaners: Option<Vec<LoanerPayload>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DiscountRequest {
    pub id: Uuid,
    pub discount: f64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SoldOutRequest {
    pub id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoanerLink {
    pub id: Uuid,
    pub description: Option<String>,
    pub loaner: Loaner,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PropertyDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub discount: Option<f64>,
    pub sold_out: bool,
    pub is_store: bool,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub move_in_date: Option<DateTime<Utc>>,
    pub rental: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub location: Option<Location>,
    pub amenities: Option<Amenities>,
    pub pictures: Vec<Image>,
    pub loaner_detail: Vec<LoanerLink>,
    pub is_wishlisted: bool,
}

#[derive(Serialize, ToSchema)]
pub struct PropertyList {
    pub items: Vec<PropertyDetail>,
}

/// A numeric search field as it arrives on the wire: a JSON number or a
/// string. Anything that does not parse degrades to "filter ignored".
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum LooseNumber {
    Num(f64),
    Text(String),
}

impl LooseNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LooseNumber::Num(value) => Some(*value),
            LooseNumber::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Minimum threshold for an amenity field, with "Any" meaning no constraint.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Threshold {
    Num(f64),
    Text(String),
}

impl Threshold {
    pub fn min_value(&self) -> Option<f64> {
        match self {
            Threshold::Num(value) => Some(*value),
            Threshold::Text(text) if text == "Any" => None,
            Threshold::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TypeFilter {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SearchPropertiesRequest {
    #[serde(rename = "type")]
    pub kind: Option<TypeFilter>,
    pub min_price: Option<LooseNumber>,
    pub max_price: Option<LooseNumber>,
    pub name: Option<String>,
    pub search: Option<String>,
    pub bedroom: Option<Threshold>,
    pub bathroom: Option<Threshold>,
    pub area: Option<Threshold>,
    pub latitude: Option<LooseNumber>,
    pub longitude: Option<LooseNumber>,
    pub radius: Option<LooseNumber>,
}

pub const KM_PER_DEGREE: f64 = 111.0;
pub const DEFAULT_RADIUS_KM: f64 = 10.0;

/// Square bounding box around a point, an equirectangular approximation of
/// "within radius kilometers" (fixed 111 km per degree, not geodesic).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

impl SearchPropertiesRequest {
    /// None unless both coordinates parse; radius falls back to the default.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let lat = self.latitude.as_ref()?.as_f64()?;
        let lon = self.longitude.as_ref()?.as_f64()?;
        let radius = self
            .radius
            .as_ref()
            .and_then(LooseNumber::as_f64)
            .unwrap_or(DEFAULT_RADIUS_KM);
        let delta = radius / KM_PER_DEGREE;
        Some(BoundingBox {
            min_lat: lat - delta,
            max_lat: lat + delta,
            min_lon: lon - delta,
            max_lon: lon + delta,
        })
    }
}
