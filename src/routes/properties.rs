use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::properties::{
        CreatePropertyRequest, DiscountRequest, PropertyDetail, PropertyList,
        SearchPropertiesRequest, SoldOutRequest, UpdatePropertyRequest,
    },
    error::AppResult,
    middleware::auth::{AuthUser, MaybeAuthUser},
    response::ApiResponse,
    routes::params::PropertyListQuery,
    services::property_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route("/search", post(search_properties))
        .route("/discount", post(set_discount))
        .route("/sold_out", post(toggle_sold_out))
        .route("/{id}", get(get_property))
        .route("/{id}", put(update_property))
}

#[utoipa::path(
    get,
    path = "/api/properties",
    params(
        ("type" = Option<String>, Query, description = "Exact property category"),
        ("status" = Option<String>, Query, description = "sold or rental"),
    ),
    responses(
        (status = 200, description = "List properties", body = ApiResponse<PropertyList>)
    ),
    tag = "Properties"
)]
pub async fn list_properties(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(query): Query<PropertyListQuery>,
) -> AppResult<Json<ApiResponse<PropertyList>>> {
    let resp = property_service::list_properties(&state, query, viewer.user_id()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/properties/search",
    request_body = SearchPropertiesRequest,
    responses(
        (status = 200, description = "Matching properties", body = ApiResponse<PropertyList>)
    ),
    tag = "Properties"
)]
pub async fn search_properties(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Json(body): Json<SearchPropertiesRequest>,
) -> AppResult<Json<ApiResponse<PropertyList>>> {
    let resp = property_service::search_properties(&state, body, viewer.user_id()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    responses(
        (status = 200, description = "Get property", body = ApiResponse<PropertyDetail>),
        (status = 404, description = "Property not found"),
    ),
    tag = "Properties"
)]
pub async fn get_property(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PropertyDetail>>> {
    let resp = property_service::get_property(&state, id, viewer.user_id()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/properties",
    request_body = CreatePropertyRequest,
    responses(
        (status = 201, description = "Create property with its aggregate", body = ApiResponse<PropertyDetail>),
        (status = 500, description = "Aggregate write failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Properties"
)]
pub async fn create_property(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePropertyRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<PropertyDetail>>)> {
    let resp = property_service::create_property(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/properties/{id}",
    params(
        ("id" = Uuid, Path, description = "Property ID")
    ),
    request_body = UpdatePropertyRequest,
    responses(
        (status = 200, description = "Updated property aggregate", body = ApiResponse<PropertyDetail>),
        (status = 404, description = "Property not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Properties"
)]
pub async fn update_property(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePropertyRequest>,
) -> AppResult<Json<ApiResponse<PropertyDetail>>> {
    let resp = property_service::update_property(&state, id, payload, viewer.user_id()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/properties/discount",
    request_body = DiscountRequest,
    responses(
        (status = 200, description = "Discount set", body = ApiResponse<serde_json::Value>)
    ),
    tag = "Properties"
)]
pub async fn set_discount(
    State(state): State<AppState>,
    Json(payload): Json<DiscountRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = property_service::set_discount(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/properties/sold_out",
    request_body = SoldOutRequest,
    responses(
        (status = 200, description = "Sold-out flag flipped", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "Property not found"),
    ),
    tag = "Properties"
)]
pub async fn toggle_sold_out(
    State(state): State<AppState>,
    Json(payload): Json<SoldOutRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = property_service::toggle_sold_out(&state, payload).await?;
    Ok(Json(resp))
}
