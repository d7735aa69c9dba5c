use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    dto::loans::{CreateHomeLoanRequest, HomeLoanDetail, HomeLoanList},
    entity::{
        criteria::{ActiveModel as CriteriaActive, Column as CritCol, Entity as CriteriaEnt},
        home_loans::{ActiveModel as LoanActive, Column as LoanCol, Entity as HomeLoans},
        loaners::{ActiveModel as LoanerActive, Column as LoanerCol, Entity as Loaners},
    },
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    routes::params::LoanListQuery,
    state::AppState,
};

pub async fn list_home_loans(
    state: &AppState,
    query: LoanListQuery,
) -> AppResult<ApiResponse<HomeLoanList>> {
    let mut condition = Condition::all();
    if let Some(term) = query.search.as_ref().filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", term);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(LoanCol::Name).ilike(pattern.clone()))
                .add(Expr::col(LoanCol::Description).ilike(pattern)),
        );
    }

    let loans = HomeLoans::find().filter(condition).all(&state.orm).await?;

    let total = loans.len() as i64;
    let items = compose_home_loans(&state.orm, loans).await?;
    Ok(ApiResponse::success(
        "Home loans",
        HomeLoanList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn create_home_loan(
    state: &AppState,
    payload: CreateHomeLoanRequest,
) -> AppResult<ApiResponse<HomeLoanDetail>> {
    let txn = state.orm.begin().await?;

    // The embedded loaner is created fresh; home-loan providers are not
    // deduplicated by name the way property loaner references are.
    let loaner = LoanerActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.loaner.name.clone()),
        logo: Set(payload.loaner.logo.clone()),
        real_state_provided: Set(payload.loaner.real_state_provided.unwrap_or(false)),
        phone: Set(payload.loaner.phone.clone()),
    }
    .insert(&txn)
    .await
    .map_err(AppError::aggregate_write("loaner"))?;

    let loan = LoanActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        description: Set(payload.description),
        loaner_id: Set(loaner.id),
    }
    .insert(&txn)
    .await
    .map_err(AppError::aggregate_write("home_loan"))?;

    for criteria in payload.criteria {
        CriteriaActive {
            id: Set(Uuid::new_v4()),
            description: Set(criteria.description),
            loan_id: Set(Some(loan.id)),
        }
        .insert(&txn)
        .await
        .map_err(AppError::aggregate_write("criteria"))?;
    }

    txn.commit().await?;

    let detail = read_home_loan_detail(&state.orm, loan.id).await?;
    Ok(ApiResponse::success(
        "Home loan created",
        detail,
        Some(Meta::empty()),
    ))
}

pub async fn read_home_loan_detail<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> AppResult<HomeLoanDetail> {
    let loan = HomeLoans::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)?;
    let mut details = compose_home_loans(conn, vec![loan]).await?;
    details.pop().ok_or(AppError::NotFound)
}

async fn compose_home_loans<C: ConnectionTrait>(
    conn: &C,
    loans: Vec<crate::entity::home_loans::Model>,
) -> AppResult<Vec<HomeLoanDetail>> {
    if loans.is_empty() {
        return Ok(Vec::new());
    }

    let loan_ids: Vec<Uuid> = loans.iter().map(|l| l.id).collect();
    let loaner_ids: Vec<Uuid> = loans.iter().map(|l| l.loaner_id).collect();

    let loaners: HashMap<Uuid, crate::entity::loaners::Model> = Loaners::find()
        .filter(LoanerCol::Id.is_in(loaner_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|m| (m.id, m))
        .collect();

    let mut criteria: HashMap<Uuid, Vec<crate::models::Criteria>> = HashMap::new();
    for row in CriteriaEnt::find()
        .filter(CritCol::LoanId.is_in(loan_ids))
        .all(conn)
        .await?
    {
        if let Some(owner) = row.loan_id {
            criteria.entry(owner).or_default().push(row.into());
        }
    }

    let details = loans
        .into_iter()
        .map(|loan| HomeLoanDetail {
            loaner: loaners.get(&loan.loaner_id).cloned().map(Into::into),
            criteria: criteria.remove(&loan.id).unwrap_or_default(),
            id: loan.id,
            name: loan.name,
            description: loan.description,
        })
        .collect();

    Ok(details)
}
