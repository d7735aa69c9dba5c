use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::auctions::{
        AuctionDetail, AuctionList, CreateAuctionRequest, PlaceBidRequest, UpdateAuctionRequest,
    },
    entity::{
        auctions::{
            ActiveModel as AuctionActive, Column as AucCol, Entity as Auctions,
            Relation as AucRel,
        },
        images::{ActiveModel as ImageActive, Column as ImgCol, Entity as Images},
        locations::{ActiveModel as LocationActive, Column as LocCol, Entity as Locations},
        wishlist_auctions::{Column as WishAucCol, Entity as WishlistAuctions},
        wishlists::{Column as WishlistCol, Entity as Wishlists},
    },
    error::{AppError, AppResult},
    models,
    response::{ApiResponse, Meta},
    routes::params::AuctionListQuery,
    state::AppState,
};

pub async fn list_auctions(
    state: &AppState,
    query: AuctionListQuery,
    viewer: Option<Uuid>,
) -> AppResult<ApiResponse<AuctionList>> {
    let mut condition = Condition::all();
    if let Some(term) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Auctions, AucCol::Name)).ilike(pattern.clone()))
                .add(Expr::col((Auctions, AucCol::Description)).ilike(pattern.clone()))
                .add(Expr::col((Locations, LocCol::Name)).ilike(pattern)),
        );
    }

    let auctions = Auctions::find()
        .join(JoinType::InnerJoin, AucRel::Location.def())
        .filter(condition)
        .order_by_desc(AucCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let total = auctions.len() as i64;
    let items = compose_auctions(&state.orm, auctions, viewer).await?;
    Ok(ApiResponse::success(
        "Auctions",
        AuctionList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn get_auction(
    state: &AppState,
    id: Uuid,
    viewer: Option<Uuid>,
) -> AppResult<ApiResponse<AuctionDetail>> {
    let detail = read_auction_detail(&state.orm, id, viewer).await?;
    Ok(ApiResponse::success("Auction", detail, None))
}

pub async fn create_auction(
    state: &AppState,
    payload: CreateAuctionRequest,
    viewer: Option<Uuid>,
) -> AppResult<ApiResponse<AuctionDetail>> {
    let txn = state.orm.begin().await?;

    let location = LocationActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.location.name),
        longitude: Set(payload.location.longitude),
        latitude: Set(payload.location.latitude),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(AppError::aggregate_write("location"))?;

    let auction = AuctionActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        starting_bid: Set(payload.starting_bid),
        current_bid: Set(None),
        start_date: Set(payload.start_date.into()),
        end_date: Set(payload.end_date.into()),
        status: Set(payload.status.unwrap_or_else(|| "PENDING".to_string())),
        location_id: Set(location.id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(AppError::aggregate_write("auction"))?;

    for picture in payload.pictures {
        ImageActive {
            id: Set(Uuid::new_v4()),
            image_url: Set(picture.image_url),
            is_cover: Set(picture.is_cover.unwrap_or(false)),
            blur_hash: Set(picture.blur_hash),
            property_id: Set(None),
            auction_id: Set(Some(auction.id)),
        }
        .insert(&txn)
        .await
        .map_err(AppError::aggregate_write("images"))?;
    }

    txn.commit().await?;

    let detail = read_auction_detail(&state.orm, auction.id, viewer).await?;
    Ok(ApiResponse::success(
        "Auction created",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn update_auction(
    state: &AppState,
    id: Uuid,
    payload: UpdateAuctionRequest,
    viewer: Option<Uuid>,
) -> AppResult<ApiResponse<AuctionDetail>> {
    let txn = state.orm.begin().await?;

    let existing = Auctions::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if let Some(patch) = payload.location {
        let location = Locations::find_by_id(existing.location_id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;
        let mut active: LocationActive = location.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(longitude) = patch.longitude {
            active.longitude = Set(longitude);
        }
        if let Some(latitude) = patch.latitude {
            active.latitude = Set(latitude);
        }
        active.updated_at = Set(Utc::now().into());
        active
            .update(&txn)
            .await
            .map_err(AppError::aggregate_write("location"))?;
    }

    // Images are replaced wholesale here, unlike the property reconcile.
    if let Some(pictures) = payload.pictures {
        Images::delete_many()
            .filter(ImgCol::AuctionId.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::aggregate_write("images"))?;
        for picture in pictures {
            ImageActive {
                id: Set(Uuid::new_v4()),
                image_url: Set(picture.image_url),
                is_cover: Set(picture.is_cover.unwrap_or(false)),
                blur_hash: Set(picture.blur_hash),
                property_id: Set(None),
                auction_id: Set(Some(id)),
            }
            .insert(&txn)
            .await
            .map_err(AppError::aggregate_write("images"))?;
        }
    }

    let mut active: AuctionActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(starting_bid) = payload.starting_bid {
        active.starting_bid = Set(starting_bid);
    }
    if let Some(start_date) = payload.start_date {
        active.start_date = Set(start_date.into());
    }
    if let Some(end_date) = payload.end_date {
        active.end_date = Set(end_date.into());
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Utc::now().into());
    active
        .update(&txn)
        .await
        .map_err(AppError::aggregate_write("auction"))?;

    txn.commit().await?;

    let detail = read_auction_detail(&state.orm, id, viewer).await?;
    Ok(ApiResponse::success("Updated", detail, Some(Meta::empty())))
}

/// A bid beats the current bid strictly, or meets the starting bid when no
/// bid exists yet.
pub fn bid_accepted(starting_bid: f64, current_bid: Option<f64>, amount: f64) -> bool {
    match current_bid {
        Some(current) => amount > current,
        None => amount >= starting_bid,
    }
}

pub async fn place_bid(
    state: &AppState,
    id: Uuid,
    payload: PlaceBidRequest,
    viewer: Option<Uuid>,
) -> AppResult<ApiResponse<AuctionDetail>> {
    let amount = payload.bid_amount;

    let auction = Auctions::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    if !bid_accepted(auction.starting_bid, auction.current_bid, amount) {
        return Err(AppError::BadRequest(
            "Bid must be higher than the current bid".into(),
        ));
    }

    // Conditional update: the same acceptance predicate is re-checked in the
    // store, so two concurrent bids cannot both win against a stale read.
    let accepted = Condition::any()
        .add(
            Condition::all()
                .add(AucCol::CurrentBid.is_null())
                .add(AucCol::StartingBid.lte(amount)),
        )
        .add(AucCol::CurrentBid.lt(amount));

    let result = Auctions::update_many()
        .col_expr(AucCol::CurrentBid, Expr::value(amount))
        .col_expr(AucCol::UpdatedAt, Expr::value(Utc::now()))
        .filter(Condition::all().add(AucCol::Id.eq(id)).add(accepted))
        .exec(&state.orm)
        .await?;

    if result.rows_affected == 0 {
        // Lost a race against a concurrent higher bid.
        return Err(AppError::BadRequest(
            "Bid must be higher than the current bid".into(),
        ));
    }

    let detail = read_auction_detail(&state.orm, id, viewer).await?;
    Ok(ApiResponse::success(
        "Bid placed",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn read_auction_detail<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    viewer: Option<Uuid>,
) -> AppResult<AuctionDetail> {
    let auction = Auctions::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut details = compose_auctions(conn, vec![auction], viewer).await?;
    details.pop().ok_or(AppError::NotFound)
}

pub async fn compose_auctions<C: ConnectionTrait>(
    conn: &C,
    auctions: Vec<crate::entity::auctions::Model>,
    viewer: Option<Uuid>,
) -> AppResult<Vec<AuctionDetail>> {
    if auctions.is_empty() {
        return Ok(Vec::new());
    }

    let auction_ids: Vec<Uuid> = auctions.iter().map(|a| a.id).collect();
    let location_ids: Vec<Uuid> = auctions.iter().map(|a| a.location_id).collect();

    let locations: HashMap<Uuid, crate::entity::locations::Model> = Locations::find()
        .filter(LocCol::Id.is_in(location_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    let mut pictures: HashMap<Uuid, Vec<models::Image>> = HashMap::new();
    for image in Images::find()
        .filter(ImgCol::AuctionId.is_in(auction_ids.clone()))
        .all(conn)
        .await?
    {
        if let Some(owner) = image.auction_id {
            pictures.entry(owner).or_default().push(image.into());
        }
    }

    let wishlisted = wishlisted_auction_ids(conn, viewer, &auction_ids).await?;

    let details = auctions
        .into_iter()
        .map(|auction| AuctionDetail {
            is_wishlisted: wishlisted.contains(&auction.id),
            location: locations.get(&auction.location_id).cloned().map(Into::into),
            pictures: pictures.remove(&auction.id).unwrap_or_default(),
            id: auction.id,
            name: auction.name,
            description: auction.description,
            starting_bid: auction.starting_bid,
            current_bid: auction.current_bid,
            start_date: auction.start_date.with_timezone(&Utc),
            end_date: auction.end_date.with_timezone(&Utc),
            status: auction.status,
            created_at: auction.created_at.with_timezone(&Utc),
            updated_at: auction.updated_at.with_timezone(&Utc),
        })
        .collect();

    Ok(details)
}

async fn wishlisted_auction_ids<C: ConnectionTrait>(
    conn: &C,
    viewer: Option<Uuid>,
    auction_ids: &[Uuid],
) -> AppResult<HashSet<Uuid>> {
    let Some(user_id) = viewer else {
        return Ok(HashSet::new());
    };
    let Some(wishlist) = Wishlists::find()
        .filter(WishlistCol::UserId.eq(user_id))
        .one(conn)
        .await?
    else {
        return Ok(HashSet::new());
    };

    let ids = WishlistAuctions::find()
        .filter(WishAucCol::WishlistId.eq(wishlist.id))
        .filter(WishAucCol::AuctionId.is_in(auction_ids.to_vec()))
        .all(conn)
        .await?
        .into_iter()
        .map(|link| link.auction_id)
        .collect();
    Ok(ids)
}
