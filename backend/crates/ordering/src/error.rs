//! Ordering Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::FieldErrors;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::ProductId;
use thiserror::Error;

pub type OrderResult<T> = Result<T, OrderError>;

#[derive(Debug, Error)]
pub enum OrderError {
    /// Field-level input errors
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Buyer not found")]
    BuyerNotFound,

    /// Only users with the `buyer` role place orders
    #[error("Only buyers can place orders")]
    NotABuyer,

    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// Carries the product name
    #[error("Insufficient stock for product {0}")]
    InsufficientStock(String),

    /// Line totals overflowed the decimal range
    #[error("Order total is too large")]
    TotalTooLarge,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrderError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Validation(_)
            | OrderError::NotABuyer
            | OrderError::InsufficientStock(_)
            | OrderError::TotalTooLarge => ErrorKind::BadRequest,
            OrderError::BuyerNotFound | OrderError::ProductNotFound(_) => ErrorKind::NotFound,
            OrderError::Database(_) | OrderError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            OrderError::Validation(fields) => AppError::validation(fields.clone()),
            OrderError::Database(_) | OrderError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            OrderError::Database(e) => {
                tracing::error!(error = %e, "Ordering database error");
            }
            OrderError::Internal(msg) => {
                tracing::error!(message = %msg, "Ordering internal error");
            }
            OrderError::InsufficientStock(product) => {
                tracing::warn!(product = %product, "Order rejected: insufficient stock");
            }
            _ => {
                tracing::debug!(error = %self, "Ordering error");
            }
        }
    }
}

impl From<FieldErrors> for OrderError {
    fn from(fields: FieldErrors) -> Self {
        OrderError::Validation(fields)
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
