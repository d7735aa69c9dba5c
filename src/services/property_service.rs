use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::properties::{
        CreatePropertyRequest, DiscountRequest, ImagePayload, LoanerLink, LoanerPayload,
        PropertyDetail, PropertyList, SearchPropertiesRequest, SoldOutRequest, TypeFilter,
        UpdatePropertyRequest,
    },
    entity::{
        amenities::{ActiveModel as AmenityActive, Column as AmenCol, Entity as AmenityEnt},
        images::{ActiveModel as ImageActive, Column as ImgCol, Entity as Images},
        loaner_properties::{
            ActiveModel as LoanerLinkActive, Column as LinkCol, Entity as LoanerLinks,
        },
        loaners::{ActiveModel as LoanerActive, Column as LoanerCol, Entity as Loaners},
        locations::{ActiveModel as LocationActive, Column as LocCol, Entity as Locations},
        properties::{
            ActiveModel as PropertyActive, Column as PropCol, Entity as Properties,
            Relation as PropRel,
        },
        wishlist_properties::{Column as WishPropCol, Entity as WishlistProperties},
        wishlists::{Column as WishlistCol, Entity as Wishlists},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models,
    response::{ApiResponse, Meta},
    routes::params::PropertyListQuery,
    state::AppState,
};

pub async fn list_properties(
    state: &AppState,
    query: PropertyListQuery,
    viewer: Option<Uuid>,
) -> AppResult<ApiResponse<PropertyList>> {
    let mut condition = Condition::all();

    if let Some(kind) = query.kind.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(PropCol::Kind.eq(kind.clone()));
    }

    // `sold` filters sold-out listings, `rental` filters rentals; the two are
    // mutually exclusive, anything else applies no status constraint.
    match query.status.as_deref().map(str::to_lowercase).as_deref() {
        Some("sold") => condition = condition.add(PropCol::SoldOut.eq(true)),
        Some("rental") => {
            condition = condition
                .add(PropCol::SoldOut.eq(false))
                .add(PropCol::Rental.eq(true));
        }
        _ => {}
    }

    let properties = Properties::find()
        .filter(condition)
        .order_by_desc(PropCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let total = properties.len() as i64;
    let items = compose_properties(&state.orm, properties, viewer).await?;
    Ok(ApiResponse::success(
        "Properties",
        PropertyList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn search_properties(
    state: &AppState,
    body: SearchPropertiesRequest,
    viewer: Option<Uuid>,
) -> AppResult<ApiResponse<PropertyList>> {
    let condition = build_search_condition(&body);

    let properties = Properties::find()
        .join(JoinType::InnerJoin, PropRel::Location.def())
        .join(JoinType::InnerJoin, PropRel::Amenities.def())
        .filter(condition)
        .order_by_desc(PropCol::CreatedAt)
        .all(&state.orm)
        .await?;

    let total = properties.len() as i64;
    let items = compose_properties(&state.orm, properties, viewer).await?;
    Ok(ApiResponse::success(
        "Search results",
        PropertyList { items },
        Some(Meta::total(total)),
    ))
}

/// All supplied filters AND together; unparsable numeric values degrade to
/// "filter ignored" rather than an error.
fn build_search_condition(body: &SearchPropertiesRequest) -> Condition {
    let mut condition = Condition::all();

    if let Some(kind) = &body.kind {
        condition = match kind {
            TypeFilter::One(value) => condition.add(PropCol::Kind.eq(value.clone())),
            TypeFilter::Many(values) => condition.add(PropCol::Kind.is_in(values.clone())),
        };
    }

    if let Some(name) = body.name.as_ref().filter(|s| !s.is_empty()) {
        condition = condition.add(
            Expr::expr(Func::lower(Expr::col((Properties, PropCol::Name))))
                .eq(name.to_lowercase()),
        );
    }

    if let Some(term) = body.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Properties, PropCol::Name)).ilike(pattern.clone()))
                .add(Expr::col((Properties, PropCol::Description)).ilike(pattern.clone()))
                .add(Expr::col((Locations, LocCol::Name)).ilike(pattern)),
        );
    }

    if let Some(min_price) = body.min_price.as_ref().and_then(|v| v.as_f64()) {
        condition = condition.add(PropCol::Price.gte(min_price));
    }
    if let Some(max_price) = body.max_price.as_ref().and_then(|v| v.as_f64()) {
        condition = condition.add(PropCol::Price.lte(max_price));
    }

    if let Some(bedroom) = body.bedroom.as_ref().and_then(|t| t.min_value()) {
        condition = condition.add(Expr::col((AmenityEnt, AmenCol::Bedroom)).gte(bedroom));
    }
    if let Some(bathroom) = body.bathroom.as_ref().and_then(|t| t.min_value()) {
        condition = condition.add(Expr::col((AmenityEnt, AmenCol::Bathroom)).gte(bathroom));
    }
    if let Some(area) = body.area.as_ref().and_then(|t| t.min_value()) {
        condition = condition.add(Expr::col((AmenityEnt, AmenCol::Area)).gte(area));
    }

    if let Some(bbox) = body.bounding_box() {
        if let (Some(min_lat), Some(max_lat), Some(min_lon), Some(max_lon)) = (
            Decimal::from_f64_retain(bbox.min_lat),
            Decimal::from_f64_retain(bbox.max_lat),
            Decimal::from_f64_retain(bbox.min_lon),
            Decimal::from_f64_retain(bbox.max_lon),
        ) {
            condition = condition
                .add(Expr::col((Locations, LocCol::Latitude)).gte(min_lat))
                .add(Expr::col((Locations, LocCol::Latitude)).lte(max_lat))
                .add(Expr::col((Locations, LocCol::Longitude)).gte(min_lon))
                .add(Expr::col((Locations, LocCol::Longitude)).lte(max_lon));
        }
    }

    condition
}

pub async fn get_property(
    state: &AppState,
    id: Uuid,
    viewer: Option<Uuid>,
) -> AppResult<ApiResponse<PropertyDetail>> {
    let detail = read_property_detail(&state.orm, id, viewer).await?;
    Ok(ApiResponse::success("Property", detail, None))
}

pub async fn create_property(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePropertyRequest,
) -> AppResult<ApiResponse<PropertyDetail>> {
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

    let property = PropertyActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        location_id: Set(location.id),
        price: Set(payload.price),
        currency: Set(payload.currency.unwrap_or_else(|| "ETB".to_string())),
        discount: Set(Some(payload.discount.unwrap_or(0.0))),
        sold_out: Set(false),
        is_store: Set(payload.is_store),
        kind: Set(payload.kind.map(|k| k.as_str().to_string())),
        move_in_date: Set(payload.move_in_date.map(Into::into)),
        rental: Set(payload.rental),
        // Owner comes from the auth context, never from the payload.
        created_by: Set(Some(user.user_id)),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(AppError::aggregate_write("property"))?;

    AmenityActive {
        id: Set(Uuid::new_v4()),
        bedroom: Set(payload.amenities.bedroom),
        bathroom: Set(payload.amenities.bathroom),
        area: Set(payload.amenities.area),
        property_id: Set(property.id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&txn)
    .await
    .map_err(AppError::aggregate_write("amenities"))?;

    for picture in payload.pictures {
        ImageActive {
            id: Set(Uuid::new_v4()),
            image_url: Set(picture.image_url),
            is_cover: Set(picture.is_cover.unwrap_or(false)),
            blur_hash: Set(picture.blur_hash),
            property_id: Set(Some(property.id)),
            auction_id: Set(None),
        }
        .insert(&txn)
        .await
        .map_err(AppError::aggregate_write("images"))?;
    }

    for loaner in payload.loaners {
        link_loaner(&txn, property.id, &loaner)
            .await
            .map_err(AppError::aggregate_write("loaners"))?;
    }

    txn.commit().await?;

    // Re-read so the response reflects store-assigned defaults and timestamps.
    let detail = read_property_detail(&state.orm, property.id, Some(user.user_id)).await?;
    Ok(ApiResponse::success(
        "Property created",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn update_property(
    state: &AppState,
    id: Uuid,
    payload: UpdatePropertyRequest,
    viewer: Option<Uuid>,
) -> AppResult<ApiResponse<PropertyDetail>> {
    let txn = state.orm.begin().await?;

    let existing = Properties::find_by_id(id)
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

    if let Some(pictures) = payload.pictures {
        reconcile_images(&txn, id, pictures)
            .await
            .map_err(AppError::aggregate_write("images"))?;
    }

    if let Some(patch) = payload.amenities {
        let amenity = AmenityEnt::find()
            .filter(AmenCol::PropertyId.eq(id))
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;
        let mut active: AmenityActive = amenity.into();
        if let Some(bedroom) = patch.bedroom {
            active.bedroom = Set(bedroom);
        }
        if let Some(bathroom) = patch.bathroom {
            active.bathroom = Set(bathroom);
        }
        if let Some(area) = patch.area {
            active.area = Set(area);
        }
        active.updated_at = Set(Utc::now().into());
        active
            .update(&txn)
            .await
            .map_err(AppError::aggregate_write("amenities"))?;
    }

    if let Some(loaners) = payload.loaners {
        // Full replace: drop every existing link, then upsert-and-link.
        LoanerLinks::delete_many()
            .filter(LinkCol::PropertyId.eq(id))
            .exec(&txn)
            .await
            .map_err(AppError::aggregate_write("loaners"))?;
        for loaner in &loaners {
            link_loaner(&txn, id, loaner)
                .await
                .map_err(AppError::aggregate_write("loaners"))?;
        }
    }

    let mut active: PropertyActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(price) = payload.price {
        active.price = Set(price);
    }
    if let Some(currency) = payload.currency {
        active.currency = Set(currency);
    }
    if let Some(discount) = payload.discount {
        active.discount = Set(Some(discount));
    }
    if let Some(sold_out) = payload.sold_out {
        active.sold_out = Set(sold_out);
    }
    if let Some(is_store) = payload.is_store {
        active.is_store = Set(is_store);
    }
    if let Some(kind) = payload.kind {
        active.kind = Set(Some(kind.as_str().to_string()));
    }
    if let Some(move_in_date) = payload.move_in_date {
        active.move_in_date = Set(Some(move_in_date.into()));
    }
    if let Some(rental) = payload.rental {
        active.rental = Set(rental);
    }
    active.updated_at = Set(Utc::now().into());
    active
        .update(&txn)
        .await
        .map_err(AppError::aggregate_write("property"))?;

    txn.commit().await?;

    let detail = read_property_detail(&state.orm, id, viewer).await?;
    Ok(ApiResponse::success("Updated", detail, Some(Meta::empty())))
}

/// Reconcile supplied pictures by URL: a known URL gets its metadata updated
/// and its association ensured, an unknown one becomes a new image. Images
/// absent from the list are left alone. The lookup never crosses into
/// auction-owned images; an image row keeps exactly one owner.
async fn reconcile_images<C: ConnectionTrait>(
    conn: &C,
    property_id: Uuid,
    pictures: Vec<ImagePayload>,
) -> Result<(), sea_orm::DbErr> {
    for picture in pictures {
        let existing = Images::find()
            .filter(ImgCol::ImageUrl.eq(picture.image_url.clone()))
            .filter(ImgCol::AuctionId.is_null())
            .one(conn)
            .await?;

        match existing {
            Some(image) => {
                let mut active: ImageActive = image.into();
                if let Some(blur_hash) = picture.blur_hash {
                    active.blur_hash = Set(Some(blur_hash));
                }
                if let Some(is_cover) = picture.is_cover {
                    active.is_cover = Set(is_cover);
                }
                active.property_id = Set(Some(property_id));
                active.update(conn).await?;
            }
            None => {
                ImageActive {
                    id: Set(Uuid::new_v4()),
                    image_url: Set(picture.image_url),
                    is_cover: Set(picture.is_cover.unwrap_or(false)),
                    blur_hash: Set(picture.blur_hash),
                    property_id: Set(Some(property_id)),
                    auction_id: Set(None),
                }
                .insert(conn)
                .await?;
            }
        }
    }
    Ok(())
}

/// Look a loaner up by exact name, creating it with the supplied defaults if
/// absent, then link it to the property.
async fn link_loaner<C: ConnectionTrait>(
    conn: &C,
    property_id: Uuid,
    payload: &LoanerPayload,
) -> Result<(), sea_orm::DbErr> {
    let loaner = Loaners::find()
        .filter(LoanerCol::Name.eq(payload.name.clone()))
        .one(conn)
        .await?;

    let loaner = match loaner {
        Some(loaner) => loaner,
        None => {
            LoanerActive {
                id: Set(Uuid::new_v4()),
                name: Set(payload.name.clone()),
                logo: Set(payload.logo.clone()),
                real_state_provided: Set(payload.real_state_provided.unwrap_or(false)),
                phone: Set(payload.phone.clone()),
            }
            .insert(conn)
            .await?
        }
    };

    let linked = LoanerLinks::find()
        .filter(LinkCol::LoanerId.eq(loaner.id))
        .filter(LinkCol::PropertyId.eq(property_id))
        .one(conn)
        .await?;
    if linked.is_none() {
        LoanerLinkActive {
            id: Set(Uuid::new_v4()),
            loaner_id: Set(loaner.id),
            property_id: Set(Some(property_id)),
            description: Set(payload.description.clone()),
        }
        .insert(conn)
        .await?;
    }
    Ok(())
}

pub async fn set_discount(
    state: &AppState,
    payload: DiscountRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    // Unconditional overwrite, no bounds validation, 200 even without a match.
    Properties::update_many()
        .col_expr(PropCol::Discount, Expr::value(payload.discount))
        .col_expr(PropCol::UpdatedAt, Expr::value(Utc::now()))
        .filter(PropCol::Id.eq(payload.id))
        .exec(&state.orm)
        .await?;

    Ok(ApiResponse::success(
        "Updated successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn toggle_sold_out(
    state: &AppState,
    payload: SoldOutRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let property = Properties::find_by_id(payload.id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let sold_out = property.sold_out;
    let mut active: PropertyActive = property.into();
    active.sold_out = Set(!sold_out);
    active.updated_at = Set(Utc::now().into());
    active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn read_property_detail<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
    viewer: Option<Uuid>,
) -> AppResult<PropertyDetail> {
    let property = Properties::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut details = compose_properties(conn, vec![property], viewer).await?;
    details.pop().ok_or(AppError::NotFound)
}

/// Batched composition of the canonical nested shape: one query per
/// sub-entity type over the whole id set, assembled in memory.
pub async fn compose_properties<C: ConnectionTrait>(
    conn: &C,
    properties: Vec<crate::entity::properties::Model>,
    viewer: Option<Uuid>,
) -> AppResult<Vec<PropertyDetail>> {
    if properties.is_empty() {
        return Ok(Vec::new());
    }

    let property_ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
    let location_ids: Vec<Uuid> = properties.iter().map(|p| p.location_id).collect();

    let locations: HashMap<Uuid, crate::entity::locations::Model> = Locations::find()
        .filter(LocCol::Id.is_in(location_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    let mut amenities: HashMap<Uuid, crate::entity::amenities::Model> = AmenityEnt::find()
        .filter(AmenCol::PropertyId.is_in(property_ids.clone()))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.property_id, m))
        .collect();

    let mut pictures: HashMap<Uuid, Vec<models::Image>> = HashMap::new();
    for image in Images::find()
        .filter(ImgCol::PropertyId.is_in(property_ids.clone()))
        .all(conn)
        .await?
    {
        if let Some(owner) = image.property_id {
            pictures.entry(owner).or_default().push(image.into());
        }
    }

    let links = LoanerLinks::find()
        .filter(LinkCol::PropertyId.is_in(property_ids.clone()))
        .all(conn)
        .await?;
    let loaner_ids: Vec<Uuid> = links.iter().map(|l| l.loaner_id).collect();
    let loaners: HashMap<Uuid, crate::entity::loaners::Model> = Loaners::find()
        .filter(LoanerCol::Id.is_in(loaner_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();
    let mut loaner_links: HashMap<Uuid, Vec<LoanerLink>> = HashMap::new();
    for link in links {
        let Some(owner) = link.property_id else {
            continue;
        };
        if let Some(loaner) = loaners.get(&link.loaner_id) {
            loaner_links.entry(owner).or_default().push(LoanerLink {
                id: link.id,
                description: link.description,
                loaner: loaner.clone().into(),
            });
        }
    }

    let wishlisted = wishlisted_property_ids(conn, viewer, &property_ids).await?;

    let details = properties
        .into_iter()
        .map(|property| PropertyDetail {
            is_wishlisted: wishlisted.contains(&property.id),
            location: locations
                .get(&property.location_id)
                .cloned()
                .map(Into::into),
            amenities: amenities.remove(&property.id).map(Into::into),
            pictures: pictures.remove(&property.id).unwrap_or_default(),
            loaner_detail: loaner_links.remove(&property.id).unwrap_or_default(),
            id: property.id,
            name: property.name,
            description: property.description,
            price: property.price,
            currency: property.currency,
            discount: property.discount,
            sold_out: property.sold_out,
            is_store: property.is_store,
            kind: property.kind,
            move_in_date: property.move_in_date.map(|d| d.with_timezone(&Utc)),
            rental: property.rental,
            created_by: property.created_by,
            created_at: property.created_at.with_timezone(&Utc),
            updated_at: property.updated_at.with_timezone(&Utc),
        })
        .collect();

    Ok(details)
}

async fn wishlisted_property_ids<C: ConnectionTrait>(
    conn: &C,
    viewer: Option<Uuid>,
    property_ids: &[Uuid],
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

    let ids = WishlistProperties::find()
        .filter(WishPropCol::WishlistId.eq(wishlist.id))
        .filter(WishPropCol::PropertyId.is_in(property_ids.to_vec()))
        .all(conn)
        .await?
        .into_iter()
        .map(|link| link.property_id)
        .collect();
    Ok(ids)
}
