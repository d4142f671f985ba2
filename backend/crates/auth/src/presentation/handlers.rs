//! HTTP Handlers

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use axum::{Extension, Json};
use std::sync::Arc;
use tokio::sync::Semaphore;

use kernel::error::app_error::AppError;
use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticatedOutput, ProfileUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
    SignUpUseCase,
};
use crate::domain::entity::user::User;
use crate::domain::repository::AuthStore;
use crate::domain::value_object::principal::SessionUser;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AuthResponse, LoginRequest, ProfileUpdateRequest, SignUpRequest};
use crate::presentation::middleware::resolve_principal;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AuthStore,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    /// Bounds concurrent PBKDF2 derivations across all requests
    pub hash_permits: Arc<Semaphore>,
}

impl<R> AuthAppState<R>
where
    R: AuthStore,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        let permits = config.max_concurrent_hashes.max(1);
        Self {
            repo,
            config,
            hash_permits: Arc::new(Semaphore::new(permits)),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
{
    let Json(req) = payload.map_err(AppError::from)?;
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.hash_permits.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            name: req.name,
            addresses: req.addresses,
        })
        .await?;

    Ok(authenticated_response(&state.config, output))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
{
    let Json(req) = payload.map_err(AppError::from)?;
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.hash_permits.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(authenticated_response(&state.config, output))
}

// ============================================================================
// Check / Logout
// ============================================================================

/// GET /auth/check
pub async fn check<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionUser>>
where
    R: AuthStore,
{
    resolve_principal(&state.repo, &state.config, &headers)
        .await?
        .map(Json)
        .ok_or(AuthError::Unauthorized)
}

/// GET /auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: AuthStore,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        if let Err(e) = use_case.execute(&token).await {
            tracing::debug!(error = %e, "Logout without a live session");
        }
    }

    (
        StatusCode::OK,
        AppendHeaders([
            (
                header::SET_COOKIE,
                state.config.session_cookie().build_expired_cookie(),
            ),
            (
                header::SET_COOKIE,
                state.config.jwt_cookie().build_expired_cookie(),
            ),
        ]),
    )
}

// ============================================================================
// Users (guarded)
// ============================================================================

/// GET /users/own
pub async fn own_profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<SessionUser>,
) -> AuthResult<Json<User>>
where
    R: AuthStore,
{
    let user = ProfileUseCase::new(state.repo.clone())
        .own(&principal.id)
        .await?;
    Ok(Json(user))
}

/// PATCH /users
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(principal): Extension<SessionUser>,
    payload: Result<Json<ProfileUpdateRequest>, JsonRejection>,
) -> AuthResult<Json<User>>
where
    R: AuthStore,
{
    let Json(req) = payload.map_err(AppError::from)?;
    let user = ProfileUseCase::new(state.repo.clone())
        .update(&principal.id, req.into())
        .await?;
    Ok(Json(user))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn authenticated_response(
    config: &AuthConfig,
    output: AuthenticatedOutput,
) -> impl IntoResponse + use<> {
    let session_cookie = config
        .session_cookie()
        .build_set_cookie(&output.session_token, Some(config.session_ttl));
    let jwt_cookie = config
        .jwt_cookie()
        .build_set_cookie(&output.jwt, Some(config.jwt_ttl));

    (
        StatusCode::CREATED,
        AppendHeaders([
            (header::SET_COOKIE, session_cookie),
            (header::SET_COOKIE, jwt_cookie),
        ]),
        Json(AuthResponse::new(output.principal, output.jwt)),
    )
}
