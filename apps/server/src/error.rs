use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cryptofolio_core::errors::{DatabaseError, Error as CoreError};
use cryptofolio_core::holdings::HoldingError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(e: &CoreError) -> StatusCode {
    if e.is_not_found() {
        return StatusCode::NOT_FOUND;
    }
    if e.is_upstream_unavailable() {
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    match e {
        CoreError::Holding(HoldingError::AlreadyExists(_))
        | CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::FORBIDDEN,
        CoreError::Holding(HoldingError::UnsupportedCoin(_))
        | CoreError::Holding(HoldingError::InvalidAmount(_))
        | CoreError::Holding(HoldingError::NegativeAmount) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Core(e) => core_status(e),
            ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
