//! Auth Routers
//!
//! `/auth` is public. `/users` is only reachable through the guard.

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::AuthStore;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, guarded};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// `/auth` and `/users` over any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: AuthStore,
{
    let state = AuthAppState::new(Arc::new(repo), Arc::new(config));

    Router::new()
        .nest("/auth", auth_routes(state.clone()))
        .nest("/users", users_routes(state))
}

/// `/auth` routes over an existing state
pub fn auth_routes<R>(state: AuthAppState<R>) -> Router
where
    R: AuthStore,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/check", get(handlers::check::<R>))
        .route("/logout", get(handlers::logout::<R>))
        .with_state(state)
}

/// `/users` routes, guarded
pub fn users_routes<R>(state: AuthAppState<R>) -> Router
where
    R: AuthStore,
{
    let guard = AuthMiddlewareState::new(state.repo.clone(), state.config.clone());

    let router = Router::new()
        .route("/own", get(handlers::own_profile::<R>))
        .route("/", patch(handlers::update_profile::<R>))
        .with_state(state);

    guarded(router, guard)
}
