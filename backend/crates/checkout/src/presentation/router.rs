//! Checkout Routers
//!
//! `/cart` and `/orders` are only reachable through the auth guard.
//! `/create-payment-intent` and `/webhook` are public.

use std::sync::Arc;

use auth::PgAuthRepository;
use auth::domain::repository::AuthStore;
use auth::middleware::{AuthMiddlewareState, guarded};
use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::application::config::PaymentConfig;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::CheckoutStore;
use crate::infra::{postgres::PgCheckoutRepository, stripe::StripeGateway};
use crate::presentation::handlers::{self, CheckoutAppState};

/// Create the checkout router with PostgreSQL repositories and Stripe
pub fn checkout_router(
    repo: PgCheckoutRepository,
    gateway: StripeGateway,
    payment: PaymentConfig,
    guard: AuthMiddlewareState<PgAuthRepository>,
) -> Router {
    checkout_router_generic(repo, gateway, payment, guard)
}

/// Every checkout mount over any store and gateway
pub fn checkout_router_generic<R, G, A>(
    repo: R,
    gateway: G,
    payment: PaymentConfig,
    guard: AuthMiddlewareState<A>,
) -> Router
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
    A: AuthStore,
{
    let state = CheckoutAppState::new(Arc::new(repo), Arc::new(gateway), Arc::new(payment));

    Router::new()
        .nest("/cart", cart_routes(state.clone(), guard.clone()))
        .nest("/orders", order_routes(state.clone(), guard))
        .merge(payment_routes(state))
}

/// `/cart` routes, guarded
pub fn cart_routes<R, G, A>(state: CheckoutAppState<R, G>, guard: AuthMiddlewareState<A>) -> Router
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
    A: AuthStore,
{
    let router = Router::new()
        .route(
            "/",
            post(handlers::add_to_cart::<R, G>).get(handlers::list_cart::<R, G>),
        )
        .route(
            "/{id}",
            patch(handlers::update_cart::<R, G>).delete(handlers::remove_from_cart::<R, G>),
        )
        .with_state(state);

    guarded(router, guard)
}

/// `/orders` routes, guarded
pub fn order_routes<R, G, A>(state: CheckoutAppState<R, G>, guard: AuthMiddlewareState<A>) -> Router
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
    A: AuthStore,
{
    let router = Router::new()
        .route(
            "/",
            post(handlers::place_order::<R, G>).get(handlers::list_orders::<R, G>),
        )
        .route("/own", get(handlers::own_orders::<R, G>))
        .route(
            "/{id}",
            patch(handlers::update_order::<R, G>).delete(handlers::delete_order::<R, G>),
        )
        .with_state(state);

    guarded(router, guard)
}

/// Payment intent creation and the provider webhook
pub fn payment_routes<R, G>(state: CheckoutAppState<R, G>) -> Router
where
    R: CheckoutStore,
    G: PaymentGateway + Sync + 'static,
{
    Router::new()
        .route(
            "/create-payment-intent",
            post(handlers::create_payment_intent::<R, G>),
        )
        .route("/webhook", post(handlers::webhook::<R, G>))
        .with_state(state)
}
