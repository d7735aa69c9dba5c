use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::tours::{RequestTourRequest, TourList},
    entity::{
        properties::Entity as Properties,
        requested_tours::{ActiveModel as TourActive, Column as TourCol, Entity as Tours},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Tour,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Admins see every requested tour; everyone else only their own.
pub async fn list_tours(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<TourList>> {
    let mut finder = Tours::find().order_by_desc(TourCol::CreatedAt);
    if !user.is_admin() {
        finder = finder.filter(TourCol::UserId.eq(user.user_id));
    }

    let items: Vec<Tour> = finder
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Tours",
        TourList { items },
        Some(Meta::total(total)),
    ))
}

/// Creates a tour unconditionally; repeated requests for the same property
/// and date are all kept.
pub async fn request_tour(
    state: &AppState,
    user: &AuthUser,
    payload: RequestTourRequest,
) -> AppResult<ApiResponse<Tour>> {
    Properties::find_by_id(payload.item_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| {
            AppError::BadRequest(format!(
                "Property with id {} does not exist",
                payload.item_id
            ))
        })?;

    let tour = TourActive {
        id: Set(Uuid::new_v4()),
        date: Set(payload.date.into()),
        status: Set("PENDING".to_string()),
        user_id: Set(user.user_id),
        property_id: Set(payload.item_id),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Tour requested",
        tour.into(),
        Some(Meta::empty()),
    ))
}
