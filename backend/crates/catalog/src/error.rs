//! Catalog Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::FieldErrors;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Field-level input errors
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// Path segment is not a UUID
    #[error("Invalid product id")]
    InvalidProductId,

    /// Absent or soft-deleted
    #[error("Product not found")]
    ProductNotFound,

    /// Caller is neither the owning seller nor an admin
    #[error("You are not allowed to modify this product")]
    NotOwner,

    /// Caller's role cannot sell
    #[error("Only sellers and admins can create products")]
    NotASeller,

    /// Lost a race for a slug with a concurrent insert
    #[error("A product with this slug already exists")]
    SlugTaken,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) | CatalogError::InvalidProductId => ErrorKind::BadRequest,
            CatalogError::ProductNotFound => ErrorKind::NotFound,
            CatalogError::NotOwner | CatalogError::NotASeller => ErrorKind::Forbidden,
            CatalogError::SlugTaken => ErrorKind::Conflict,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Validation(fields) => AppError::validation(fields.clone()),
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            CatalogError::SlugTaken => AppError::conflict(self.to_string())
                .with_action("Retry the request"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::NotOwner | CatalogError::NotASeller => {
                tracing::warn!(error = %self, "Catalog access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl From<FieldErrors> for CatalogError {
    fn from(fields: FieldErrors) -> Self {
        CatalogError::Validation(fields)
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
