use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity;

/// The ten listing categories accepted on property writes. Stored as plain
/// text so that search filters can match arbitrary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PropertyKind {
    #[serde(rename = "Plot Land")]
    PlotLand,
    #[serde(rename = "Single Family")]
    SingleFamily,
    Apartment,
    Penthouse,
    Townhouse,
    Villa,
    Commercial,
    Condominium,
    #[serde(rename = "Office Space")]
    OfficeSpace,
    Warehouse,
}

impl PropertyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::PlotLand => "Plot Land",
            PropertyKind::SingleFamily => "Single Family",
            PropertyKind::Apartment => "Apartment",
            PropertyKind::Penthouse => "Penthouse",
            PropertyKind::Townhouse => "Townhouse",
            PropertyKind::Villa => "Villa",
            PropertyKind::Commercial => "Commercial",
            PropertyKind::Condominium => "Condominium",
            PropertyKind::OfficeSpace => "Office Space",
            PropertyKind::Warehouse => "Warehouse",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub longitude: Decimal,
    pub latitude: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::locations::Model> for Location {
    fn from(model: entity::locations::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            longitude: model.longitude,
            latitude: model.latitude,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Amenities {
    pub id: Uuid,
    pub bedroom: i32,
    pub bathroom: i32,
    pub area: f64,
    pub property_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::amenities::Model> for Amenities {
    fn from(model: entity::amenities::Model) -> Self {
        Self {
            id: model.id,
            bedroom: model.bedroom,
            bathroom: model.bathroom,
            area: model.area,
            property_id: model.property_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Image {
    pub id: Uuid,
    pub image_url: String,
    pub is_cover: bool,
    pub blur_hash: Option<String>,
}

impl From<entity::images::Model> for Image {
    fn from(model: entity::images::Model) -> Self {
        Self {
            id: model.id,
            image_url: model.image_url,
            is_cover: model.is_cover,
            blur_hash: model.blur_hash,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Loaner {
    pub id: Uuid,
    pub name: String,
    pub logo: Option<String>,
    pub real_state_provided: bool,
    pub phone: Option<String>,
}

impl From<entity::loaners::Model> for Loaner {
    fn from(model: entity::loaners::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            logo: model.logo,
            real_state_provided: model.real_state_provided,
            phone: model.phone,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Criteria {
    pub id: Uuid,
    pub description: String,
    pub loan_id: Option<Uuid>,
}

impl From<entity::criteria::Model> for Criteria {
    fn from(model: entity::criteria::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            loan_id: model.loan_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Tour {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub status: String,
    pub user_id: Uuid,
    pub property_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::requested_tours::Model> for Tour {
    fn from(model: entity::requested_tours::Model) -> Self {
        Self {
            id: model.id,
            date: model.date.with_timezone(&Utc),
            status: model.status,
            user_id: model.user_id,
            property_id: model.property_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
