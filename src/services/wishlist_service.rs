use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    dto::wishlist::{AddWishlistItemRequest, WishlistDetail},
    entity::{
        auctions::Entity as Auctions,
        properties::Entity as Properties,
        wishlist_auctions::{
            ActiveModel as WishAucActive, Column as WishAucCol, Entity as WishlistAuctions,
        },
        wishlist_properties::{
            ActiveModel as WishPropActive, Column as WishPropCol, Entity as WishlistProperties,
        },
        wishlists::{ActiveModel as WishlistActive, Column as WishlistCol, Entity as Wishlists},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    services::{auction_service, property_service},
    state::AppState,
};

/// Idempotent get-or-create for the caller's wishlist.
pub async fn get_or_create_wishlist(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<WishlistDetail>> {
    let existing = Wishlists::find()
        .filter(WishlistCol::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?;

    let wishlist = match existing {
        Some(wishlist) => wishlist,
        None => {
            WishlistActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.user_id),
                created_at: NotSet,
                updated_at: NotSet,
            }
            .insert(&state.orm)
            .await?
        }
    };

    let detail = compose_wishlist(&state.orm, wishlist, user.user_id).await?;
    Ok(ApiResponse::success("Wishlist", detail, Some(Meta::empty())))
}

pub async fn my_wishlist(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<WishlistDetail>> {
    let wishlist = Wishlists::find()
        .filter(WishlistCol::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let detail = compose_wishlist(&state.orm, wishlist, user.user_id).await?;
    Ok(ApiResponse::success("Wishlist", detail, Some(Meta::empty())))
}

/// Membership toggle keyed by existence: adding a present item or removing an
/// absent one is a no-op success.
pub async fn add_items(
    state: &AppState,
    user: &AuthUser,
    payload: AddWishlistItemRequest,
) -> AppResult<ApiResponse<WishlistDetail>> {
    let wishlist = Wishlists::find()
        .filter(WishlistCol::UserId.eq(user.user_id))
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if payload.is_property {
        Properties::find_by_id(payload.item_id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Property with id {} does not exist",
                    payload.item_id
                ))
            })?;

        let existing = WishlistProperties::find()
            .filter(WishPropCol::WishlistId.eq(wishlist.id))
            .filter(WishPropCol::PropertyId.eq(payload.item_id))
            .one(&state.orm)
            .await?;

        match (payload.is_wishlisted, existing) {
            (true, None) => {
                WishPropActive {
                    id: Set(Uuid::new_v4()),
                    wishlist_id: Set(wishlist.id),
                    property_id: Set(payload.item_id),
                }
                .insert(&state.orm)
                .await?;
            }
            (false, Some(link)) => {
                link.delete(&state.orm).await?;
            }
            _ => {}
        }
    } else {
        Auctions::find_by_id(payload.item_id)
            .one(&state.orm)
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Auction with id {} does not exist",
                    payload.item_id
                ))
            })?;

        let existing = WishlistAuctions::find()
            .filter(WishAucCol::WishlistId.eq(wishlist.id))
            .filter(WishAucCol::AuctionId.eq(payload.item_id))
            .one(&state.orm)
            .await?;

        match (payload.is_wishlisted, existing) {
            (true, None) => {
                WishAucActive {
                    id: Set(Uuid::new_v4()),
                    wishlist_id: Set(wishlist.id),
                    auction_id: Set(payload.item_id),
                }
                .insert(&state.orm)
                .await?;
            }
            (false, Some(link)) => {
                link.delete(&state.orm).await?;
            }
            _ => {}
        }
    }

    let detail = compose_wishlist(&state.orm, wishlist, user.user_id).await?;
    Ok(ApiResponse::success("Wishlist", detail, Some(Meta::empty())))
}

async fn compose_wishlist<C: ConnectionTrait>(
    conn: &C,
    wishlist: crate::entity::wishlists::Model,
    viewer: Uuid,
) -> AppResult<WishlistDetail> {
    let property_ids: Vec<Uuid> = WishlistProperties::find()
        .filter(WishPropCol::WishlistId.eq(wishlist.id))
        .all(conn)
        .await?
        .into_iter()
        .map(|link| link.property_id)
        .collect();
    let properties = Properties::find()
        .filter(crate::entity::properties::Column::Id.is_in(property_ids))
        .all(conn)
        .await?;
    let properties = property_service::compose_properties(conn, properties, Some(viewer)).await?;

    let auction_ids: Vec<Uuid> = WishlistAuctions::find()
        .filter(WishAucCol::WishlistId.eq(wishlist.id))
        .all(conn)
        .await?
        .into_iter()
        .map(|link| link.auction_id)
        .collect();
    let auctions = Auctions::find()
        .filter(crate::entity::auctions::Column::Id.is_in(auction_ids))
        .all(conn)
        .await?;
    let auctions = auction_service::compose_auctions(conn, auctions, Some(viewer)).await?;

    Ok(WishlistDetail {
        id: wishlist.id,
        user_id: wishlist.user_id,
        properties,
        auctions,
        created_at: wishlist.created_at.with_timezone(&Utc),
        updated_at: wishlist.updated_at.with_timezone(&Utc),
    })
}
