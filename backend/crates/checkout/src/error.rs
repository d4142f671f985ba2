//! Checkout Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart item not found")]
    CartItemNotFound,

    #[error("Order not found")]
    OrderNotFound,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Not enough stock for {0}")]
    OutOfStock(String),

    #[error("{0}")]
    Validation(String),

    /// Caller lacks the admin role
    #[error("Forbidden")]
    Forbidden,

    /// Bad or missing provider signature
    #[error("Webhook Error: {0}")]
    Webhook(String),

    /// Payment provider call failed
    #[error("Payment provider error: {0}")]
    Gateway(String),

    #[error(transparent)]
    Store(AppError),
}

impl CheckoutError {
    pub fn validation(message: impl Into<String>) -> Self {
        CheckoutError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CheckoutError::CartItemNotFound
            | CheckoutError::OrderNotFound
            | CheckoutError::ProductNotFound => ErrorKind::NotFound,
            CheckoutError::EmptyCart
            | CheckoutError::OutOfStock(_)
            | CheckoutError::Validation(_)
            | CheckoutError::Webhook(_) => ErrorKind::BadRequest,
            CheckoutError::Forbidden => ErrorKind::Forbidden,
            CheckoutError::Gateway(_) => ErrorKind::BadGateway,
            CheckoutError::Store(err) => err.kind(),
        }
    }

    fn log(&self) {
        match self {
            CheckoutError::Store(err) if err.is_server_error() => {
                tracing::error!(error = ?err, "Checkout store error");
            }
            CheckoutError::Gateway(msg) => {
                tracing::error!(message = %msg, "Payment provider call failed");
            }
            CheckoutError::Webhook(msg) => {
                tracing::warn!(reason = %msg, "Rejected webhook delivery");
            }
            _ => {
                tracing::debug!(error = %self, "Checkout error");
            }
        }
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Store(app) => app,
            CheckoutError::Gateway(_) => AppError::bad_gateway("Payment provider unavailable")
                .with_action("Retry the payment in a moment"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<AppError> for CheckoutError {
    fn from(err: AppError) -> Self {
        CheckoutError::Store(err)
    }
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::Store(AppError::from(err))
    }
}

impl From<catalog::CatalogError> for CheckoutError {
    fn from(err: catalog::CatalogError) -> Self {
        match err {
            catalog::CatalogError::ProductNotFound => CheckoutError::ProductNotFound,
            catalog::CatalogError::Validation(msg) => CheckoutError::Validation(msg),
            other => CheckoutError::Store(other.into()),
        }
    }
}

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        CheckoutError::Gateway(err.to_string())
    }
}
