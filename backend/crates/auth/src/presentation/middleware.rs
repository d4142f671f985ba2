//! Auth Middleware
//!
//! Route guard for protected routers. A request is authenticated by its
//! session cookie first, then by its `jwt` cookie. The resolved
//! [`SessionUser`] is inserted into request extensions for handlers to take
//! with `Extension<SessionUser>`.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use platform::cookie::extract_cookie;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::verifier::{CredentialVerifier, TokenVerifier};
use crate::application::CheckSessionUseCase;
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::principal::SessionUser;
use crate::error::{AuthError, AuthResult};

/// Middleware state
pub struct AuthMiddlewareState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthMiddlewareState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R> AuthMiddlewareState<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }
}

/// Resolve the caller from cookies. `Ok(None)` when neither cookie
/// authenticates.
pub async fn resolve_principal<R>(
    repo: &Arc<R>,
    config: &Arc<AuthConfig>,
    headers: &HeaderMap,
) -> AuthResult<Option<SessionUser>>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(headers, &config.session_cookie_name) {
        match CheckSessionUseCase::new(repo.clone(), config.clone())
            .execute(&token)
            .await
        {
            Ok(principal) => return Ok(Some(principal)),
            Err(AuthError::Unauthorized) => {}
            Err(e) => return Err(e),
        }
    }

    if let Some(token) = extract_cookie(headers, &config.jwt_cookie_name) {
        return TokenVerifier::new(repo.clone(), config).verify(token).await;
    }

    Ok(None)
}

/// Middleware that requires an authenticated caller
pub async fn require_auth<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    // The request body is not Sync; do not hold a borrow of it across awaits
    let headers = req.headers().clone();

    let principal = resolve_principal(&state.repo, &state.config, &headers)
        .await
        .map_err(IntoResponse::into_response)?
        .ok_or_else(|| AuthError::Unauthorized.into_response())?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Put every route of `router` behind [`require_auth`]
pub fn guarded<R>(router: Router, state: AuthMiddlewareState<R>) -> Router
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
        let state = state.clone();
        async move { require_auth(state, req, next).await }
    }))
}
