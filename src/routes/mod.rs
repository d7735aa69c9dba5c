use axum::Router;

use crate::state::AppState;

pub mod auctions;
pub mod doc;
pub mod health;
pub mod images;
pub mod loans;
pub mod params;
pub mod properties;
pub mod tours;
pub mod wishlist;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/properties", properties::router())
        .nest("/auctions", auctions::router())
        .nest("/loans", loans::router())
        .nest("/wishlist", wishlist::router())
        .nest("/tours", tours::router())
        .nest("/images", images::router())
}
