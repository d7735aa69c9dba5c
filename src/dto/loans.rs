use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Criteria, Loaner};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CriteriaPayload {
    pub description: String,
}

/// The loan's provider as embedded in the create request. Unlike the loaner
/// reference on properties there is no link description here.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EmbeddedLoanerPayload {
    pub name: String,
    pub logo: Option<String>,
    pub real_state_provided: Option<bool>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHomeLoanRequest {
    pub name: String,
    pub description: String,
    // Always created fresh, never deduped by name.
    pub loaner: EmbeddedLoanerPayload,
    #[serde(default)]
    pub criteria: Vec<CriteriaPayload>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomeLoanDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub loaner: Option<Loaner>,
    pub criteria: Vec<Criteria>,
}

#[derive(Serialize, ToSchema)]
pub struct HomeLoanList {
    pub items: Vec<HomeLoanDetail>,
}
