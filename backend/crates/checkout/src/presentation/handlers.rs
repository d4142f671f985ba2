//! HTTP Handlers
//!
//! Cart and order handlers run behind the auth guard and take the caller
//! from request extensions. The payment handlers are public.

use std::sync::Arc;

use auth::SessionUser;
use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::IntoResponse;
use kernel::error::app_error::AppError;
use kernel::id::{CartItemId, OrderId};
use kernel::query::TOTAL_COUNT_HEADER;

use crate::application::webhook::SIGNATURE_HEADER;
use crate::application::{CartUseCase, OrderUseCase, PaymentConfig, PaymentUseCase};
use crate::domain::entity::{CartLine, Order, OrderPatch};
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::CheckoutStore;
use crate::error::{CheckoutError, CheckoutResult};
use crate::presentation::dto::{
    AddToCartRequest, CartQuantityRequest, OrderListParams, PaymentIntentRequest,
    PaymentIntentResponse, PlaceOrderRequest, WebhookAck,
};

/// Shared state for checkout handlers
pub struct CheckoutAppState<R, G> {
    pub repo: Arc<R>,
    pub gateway: Arc<G>,
    pub payment: Arc<PaymentConfig>,
}

impl<R, G> Clone for CheckoutAppState<R, G> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            gateway: self.gateway.clone(),
            payment: self.payment.clone(),
        }
    }
}

impl<R, G> CheckoutAppState<R, G>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    pub fn new(repo: Arc<R>, gateway: Arc<G>, payment: Arc<PaymentConfig>) -> Self {
        Self {
            repo,
            gateway,
            payment,
        }
    }

    fn payments(&self) -> PaymentUseCase<R, G> {
        PaymentUseCase::new(self.repo.clone(), self.gateway.clone(), self.payment.clone())
    }
}

fn require_admin(principal: &SessionUser) -> CheckoutResult<()> {
    if principal.role.is_admin() {
        Ok(())
    } else {
        Err(CheckoutError::Forbidden)
    }
}

// ============================================================================
// Cart
// ============================================================================

/// POST /cart
pub async fn add_to_cart<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    Extension(principal): Extension<SessionUser>,
    payload: Result<Json<AddToCartRequest>, JsonRejection>,
) -> CheckoutResult<(StatusCode, Json<CartLine>)>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;
    let line = CartUseCase::new(state.repo.clone())
        .add(principal.id, req.product, req.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// GET /cart
pub async fn list_cart<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    Extension(principal): Extension<SessionUser>,
) -> CheckoutResult<Json<Vec<CartLine>>>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    let lines = CartUseCase::new(state.repo.clone())
        .lines(&principal.id)
        .await?;
    Ok(Json(lines))
}

/// PATCH /cart/{id}
pub async fn update_cart<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    Extension(principal): Extension<SessionUser>,
    id: Result<Path<CartItemId>, PathRejection>,
    payload: Result<Json<CartQuantityRequest>, JsonRejection>,
) -> CheckoutResult<Json<CartLine>>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    let Path(id) = id.map_err(AppError::from)?;
    let Json(req) = payload.map_err(AppError::from)?;
    let line = CartUseCase::new(state.repo.clone())
        .set_quantity(&principal.id, &id, req.quantity)
        .await?;
    Ok(Json(line))
}

/// DELETE /cart/{id}
pub async fn remove_from_cart<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    Extension(principal): Extension<SessionUser>,
    id: Result<Path<CartItemId>, PathRejection>,
) -> CheckoutResult<Json<CartLine>>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    let Path(id) = id.map_err(AppError::from)?;
    let line = CartUseCase::new(state.repo.clone())
        .remove(&principal.id, &id)
        .await?;
    Ok(Json(line))
}

// ============================================================================
// Orders
// ============================================================================

/// POST /orders
pub async fn place_order<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    Extension(principal): Extension<SessionUser>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> CheckoutResult<(StatusCode, Json<Order>)>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;
    let order = OrderUseCase::new(state.repo.clone())
        .place(&principal, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /orders/own
pub async fn own_orders<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    Extension(principal): Extension<SessionUser>,
) -> CheckoutResult<Json<Vec<Order>>>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    let orders = OrderUseCase::new(state.repo.clone()).own(&principal).await?;
    Ok(Json(orders))
}

/// GET /orders (admin)
pub async fn list_orders<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    Extension(principal): Extension<SessionUser>,
    params: Result<Query<OrderListParams>, QueryRejection>,
) -> CheckoutResult<impl IntoResponse>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    require_admin(&principal)?;
    let Query(params) = params.map_err(AppError::from)?;
    let query = params.into_query()?;

    let page = OrderUseCase::new(state.repo.clone()).list(&query).await?;

    Ok((
        [(
            HeaderName::from_static(TOTAL_COUNT_HEADER),
            page.total.to_string(),
        )],
        Json(page.items),
    ))
}

/// PATCH /orders/{id} (admin)
pub async fn update_order<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    Extension(principal): Extension<SessionUser>,
    id: Result<Path<OrderId>, PathRejection>,
    payload: Result<Json<OrderPatch>, JsonRejection>,
) -> CheckoutResult<Json<Order>>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    require_admin(&principal)?;
    let Path(id) = id.map_err(AppError::from)?;
    let Json(patch) = payload.map_err(AppError::from)?;
    let order = OrderUseCase::new(state.repo.clone())
        .update(&id, patch)
        .await?;
    Ok(Json(order))
}

/// DELETE /orders/{id} (admin)
pub async fn delete_order<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    Extension(principal): Extension<SessionUser>,
    id: Result<Path<OrderId>, PathRejection>,
) -> CheckoutResult<StatusCode>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    require_admin(&principal)?;
    let Path(id) = id.map_err(AppError::from)?;
    OrderUseCase::new(state.repo.clone()).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Payment
// ============================================================================

/// POST /create-payment-intent
pub async fn create_payment_intent<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    payload: Result<Json<PaymentIntentRequest>, JsonRejection>,
) -> CheckoutResult<Json<PaymentIntentResponse>>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;
    let client_secret = state.payments().create_intent(req.into()).await?;
    Ok(Json(PaymentIntentResponse { client_secret }))
}

/// POST /webhook
///
/// Takes the raw body: the signature covers the exact bytes sent.
pub async fn webhook<R, G>(
    State(state): State<CheckoutAppState<R, G>>,
    headers: HeaderMap,
    body: Bytes,
) -> CheckoutResult<Json<WebhookAck>>
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    state.payments().handle_webhook(&body, signature).await?;
    Ok(Json(WebhookAck { received: true }))
}
