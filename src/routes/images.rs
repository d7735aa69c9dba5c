use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::images::{BulkCreateImagesRequest, ImageList},
    error::AppResult,
    response::ApiResponse,
    services::image_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/bulk_create", post(bulk_create))
}

#[utoipa::path(
    post,
    path = "/api/images/bulk_create",
    request_body = BulkCreateImagesRequest,
    responses(
        (status = 201, description = "Created images", body = ApiResponse<ImageList>),
        (status = 404, description = "Property not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Images"
)]
pub async fn bulk_create(
    State(state): State<AppState>,
    Json(payload): Json<BulkCreateImagesRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<ImageList>>)> {
    let resp = image_service::bulk_create(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
