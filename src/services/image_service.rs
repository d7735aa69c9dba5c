use sea_orm::{ActiveModelTrait, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    dto::images::{BulkCreateImagesRequest, ImageList},
    entity::{images::ActiveModel as ImageActive, properties::Entity as Properties},
    error::{AppError, AppResult},
    models::Image,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn bulk_create(
    state: &AppState,
    payload: BulkCreateImagesRequest,
) -> AppResult<ApiResponse<ImageList>> {
    let property = Properties::find_by_id(payload.property_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let txn = state.orm.begin().await?;

    let mut items: Vec<Image> = Vec::with_capacity(payload.images.len());
    for picture in payload.images {
        let image = ImageActive {
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
        items.push(image.into());
    }

    txn.commit().await?;

    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Images created",
        ImageList { items },
        Some(Meta::total(total)),
    ))
}
