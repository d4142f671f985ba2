//! Catalog Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found")]
    ProductNotFound,

    /// Body or query failed validation
    #[error("{0}")]
    Validation(String),

    /// Category or brand value already exists
    #[error("{0} already exists")]
    Duplicate(String),

    #[error(transparent)]
    Store(AppError),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        CatalogError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::ProductNotFound => ErrorKind::NotFound,
            CatalogError::Validation(_) | CatalogError::Duplicate(_) => ErrorKind::BadRequest,
            CatalogError::Store(err) => err.kind(),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Store(err) if err.is_server_error() => {
                tracing::error!(error = ?err, "Catalog store error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Store(app) => app,
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<AppError> for CatalogError {
    fn from(err: AppError) -> Self {
        CatalogError::Store(err)
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        CatalogError::Store(AppError::from(err))
    }
}
