use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Forbidden")]
    Forbidden,

    /// A sub-step of a composed aggregate write failed. The whole unit was
    /// rolled back; the caller gets a generic message plus the step name,
    /// while the cause stays in the server log.
    #[error("Something went wrong while saving the aggregate")]
    AggregateWrite {
        step: &'static str,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn aggregate_write(step: &'static str) -> impl FnOnce(sea_orm::DbErr) -> AppError {
        move |source| AppError::AggregateWrite { step, source }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Forbidden => "forbidden",
            AppError::AggregateWrite { .. } => "aggregate_write",
            AppError::OrmError(_) => "db_error",
            AppError::Internal(_) => "internal",
        }
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::AggregateWrite { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::OrmError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let step = match &self {
            AppError::AggregateWrite { step, source } => {
                tracing::error!(step = %step, error = %source, "aggregate write failed");
                Some(*step)
            }
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "database error");
                None
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal error");
                None
            }
            _ => None,
        };

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
                code: self.code(),
                step,
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
