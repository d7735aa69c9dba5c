use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::wishlist::{AddWishlistItemRequest, WishlistDetail},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::wishlist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(my_wishlist).post(get_or_create_wishlist))
        .route("/add_items", post(add_items))
}

#[utoipa::path(
    get,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "The caller's wishlist aggregate", body = ApiResponse<WishlistDetail>),
        (status = 404, description = "No wishlist yet"),
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn my_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<WishlistDetail>>> {
    let resp = wishlist_service::my_wishlist(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "Get or create the caller's wishlist", body = ApiResponse<WishlistDetail>)
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn get_or_create_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<WishlistDetail>>> {
    let resp = wishlist_service::get_or_create_wishlist(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/wishlist/add_items",
    request_body = AddWishlistItemRequest,
    responses(
        (status = 200, description = "Refreshed wishlist aggregate", body = ApiResponse<WishlistDetail>),
        (status = 400, description = "Item id does not resolve"),
        (status = 404, description = "Wishlist missing"),
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn add_items(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddWishlistItemRequest>,
) -> AppResult<Json<ApiResponse<WishlistDetail>>> {
    let resp = wishlist_service::add_items(&state, &user, payload).await?;
    Ok(Json(resp))
}
