use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::tours::{RequestTourRequest, TourList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Tour,
    response::ApiResponse,
    services::tour_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tours))
        .route("/add_items", post(request_tour))
}

#[utoipa::path(
    get,
    path = "/api/tours",
    responses(
        (status = 200, description = "List requested tours", body = ApiResponse<TourList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Tours"
)]
pub async fn list_tours(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<TourList>>> {
    let resp = tour_service::list_tours(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/tours/add_items",
    request_body = RequestTourRequest,
    responses(
        (status = 200, description = "Created tour", body = ApiResponse<Tour>),
        (status = 400, description = "Property does not resolve"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tours"
)]
pub async fn request_tour(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RequestTourRequest>,
) -> AppResult<Json<ApiResponse<Tour>>> {
    let resp = tour_service::request_tour(&state, &user, payload).await?;
    Ok(Json(resp))
}
