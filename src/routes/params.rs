use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PropertyListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// `sold` or `rental`; anything else applies no status constraint.
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AuctionListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoanListQuery {
    pub search: Option<String>,
}
