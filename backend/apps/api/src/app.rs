//! Application Router
//!
//! Mounts every domain router and wraps them in the shared layers.

use std::sync::Arc;

use auth::middleware::AuthMiddlewareState;
use auth::{PgAuthRepository, auth_router};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, header};
use catalog::{PgCatalogRepository, catalog_router};
use checkout::{PgCheckoutRepository, StripeGateway, checkout_router};
use kernel::query::TOTAL_COUNT_HEADER;
use sqlx::PgPool;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Request bodies above this are rejected with 413
pub const BODY_LIMIT: usize = 500 * 1024;

pub fn build_router(pool: PgPool, config: &ServerConfig) -> anyhow::Result<Router> {
    let auth_repo = PgAuthRepository::new(pool.clone());
    let guard = AuthMiddlewareState::new(
        Arc::new(auth_repo.clone()),
        Arc::new(config.auth.clone()),
    );
    let gateway = StripeGateway::new(&config.payment)
        .map_err(|e| anyhow::anyhow!("payment gateway: {e}"))?;

    let api = Router::new()
        .merge(auth_router(auth_repo, config.auth.clone()))
        .merge(catalog_router(
            PgCatalogRepository::new(pool.clone()),
            config.catalog.clone(),
        ))
        .merge(checkout_router(
            PgCheckoutRepository::new(pool),
            gateway,
            config.payment.clone(),
            guard,
        ));

    Ok(with_layers(api, config))
}

/// Static fallback, body limit, tracing and CORS around the API routes
pub fn with_layers(api: Router, config: &ServerConfig) -> Router {
    let static_files = ServeDir::new(&config.static_dir)
        .fallback(ServeFile::new(config.static_dir.join("index.html")));

    api.fallback_service(static_files)
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(cors(&config.frontend_origins))
}

fn cors(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .expose_headers([HeaderName::from_static(TOTAL_COUNT_HEADER)])
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use axum::routing::{get, post};
    use tower::ServiceExt;

    fn config() -> ServerConfig {
        ServerConfig::from_lookup(
            |key| match key {
                "DATABASE_URL" => Some("postgres://unused".into()),
                "FRONTEND_ORIGINS" => Some("http://shop.test".into()),
                "STATIC_DIR" => Some("/nonexistent/build".into()),
                _ => None,
            },
            true,
        )
        .unwrap()
    }

    fn app() -> Router {
        let api = Router::new()
            .route("/products", get(|| async { ([(TOTAL_COUNT_HEADER, "0")], "[]") }))
            .route("/echo", post(|body: Bytes| async move { body.len().to_string() }));
        with_layers(api, &config())
    }

    #[tokio::test]
    async fn test_cors_exposes_total_count() {
        let res = app()
            .oneshot(
                Request::builder()
                    .uri("/products")
                    .header(header::ORIGIN, "http://shop.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let headers = res.headers();
        assert_eq!(headers["access-control-allow-origin"], "http://shop.test");
        assert_eq!(headers["access-control-allow-credentials"], "true");
        assert!(
            headers["access-control-expose-headers"]
                .to_str()
                .unwrap()
                .contains(TOTAL_COUNT_HEADER)
        );
    }

    #[tokio::test]
    async fn test_body_limit() {
        let res = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/echo")
                    .body(Body::from(vec![b'x'; BODY_LIMIT + 1]))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_unmatched_path_falls_back_to_static_dir() {
        let res = app()
            .oneshot(Request::builder().uri("/cart-page").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
