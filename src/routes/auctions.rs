use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::auctions::{
        AuctionDetail, AuctionList, CreateAuctionRequest, PlaceBidRequest, UpdateAuctionRequest,
    },
    error::AppResult,
    middleware::auth::MaybeAuthUser,
    response::ApiResponse,
    routes::params::AuctionListQuery,
    services::auction_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_auctions).post(create_auction))
        .route("/{id}", get(get_auction).put(update_auction))
        .route("/{id}/place_bid", post(place_bid))
}

#[utoipa::path(
    get,
    path = "/api/auctions",
    params(
        ("search" = Option<String>, Query, description = "Substring over name, description, location name"),
    ),
    responses(
        (status = 200, description = "List auctions", body = ApiResponse<AuctionList>)
    ),
    tag = "Auctions"
)]
pub async fn list_auctions(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(query): Query<AuctionListQuery>,
) -> AppResult<Json<ApiResponse<AuctionList>>> {
    let resp = auction_service::list_auctions(&state, query, viewer.user_id()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/auctions/{id}",
    params(
        ("id" = Uuid, Path, description = "Auction ID")
    ),
    responses(
        (status = 200, description = "Get auction", body = ApiResponse<AuctionDetail>),
        (status = 404, description = "Auction not found"),
    ),
    tag = "Auctions"
)]
pub async fn get_auction(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<AuctionDetail>>> {
    let resp = auction_service::get_auction(&state, id, viewer.user_id()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auctions",
    request_body = CreateAuctionRequest,
    responses(
        (status = 201, description = "Create auction with its aggregate", body = ApiResponse<AuctionDetail>),
        (status = 500, description = "Aggregate write failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Auctions"
)]
pub async fn create_auction(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Json(payload): Json<CreateAuctionRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuctionDetail>>)> {
    let resp = auction_service::create_auction(&state, payload, viewer.user_id()).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/auctions/{id}",
    params(
        ("id" = Uuid, Path, description = "Auction ID")
    ),
    request_body = UpdateAuctionRequest,
    responses(
        (status = 200, description = "Updated auction aggregate", body = ApiResponse<AuctionDetail>),
        (status = 404, description = "Auction not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Auctions"
)]
pub async fn update_auction(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAuctionRequest>,
) -> AppResult<Json<ApiResponse<AuctionDetail>>> {
    let resp = auction_service::update_auction(&state, id, payload, viewer.user_id()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auctions/{id}/place_bid",
    params(
        ("id" = Uuid, Path, description = "Auction ID")
    ),
    request_body = PlaceBidRequest,
    responses(
        (status = 200, description = "Bid accepted", body = ApiResponse<AuctionDetail>),
        (status = 400, description = "Bid not higher than current bid"),
        (status = 404, description = "Auction not found"),
    ),
    tag = "Auctions"
)]
pub async fn place_bid(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PlaceBidRequest>,
) -> AppResult<Json<ApiResponse<AuctionDetail>>> {
    let resp = auction_service::place_bid(&state, id, payload, viewer.user_id()).await?;
    Ok(Json(resp))
}
