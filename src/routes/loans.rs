use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::loans::{CreateHomeLoanRequest, HomeLoanDetail, HomeLoanList},
    error::AppResult,
    response::ApiResponse,
    routes::params::LoanListQuery,
    services::loan_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_home_loans).post(create_home_loan))
}

#[utoipa::path(
    get,
    path = "/api/loans",
    params(
        ("search" = Option<String>, Query, description = "Substring over name and description"),
    ),
    responses(
        (status = 200, description = "List home loans", body = ApiResponse<HomeLoanList>)
    ),
    tag = "HomeLoans"
)]
pub async fn list_home_loans(
    State(state): State<AppState>,
    Query(query): Query<LoanListQuery>,
) -> AppResult<Json<ApiResponse<HomeLoanList>>> {
    let resp = loan_service::list_home_loans(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/loans",
    request_body = CreateHomeLoanRequest,
    responses(
        (status = 201, description = "Create home loan with loaner and criteria", body = ApiResponse<HomeLoanDetail>),
        (status = 500, description = "Aggregate write failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "HomeLoans"
)]
pub async fn create_home_loan(
    State(state): State<AppState>,
    Json(payload): Json<CreateHomeLoanRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<HomeLoanDetail>>)> {
    let resp = loan_service::create_home_loan(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
