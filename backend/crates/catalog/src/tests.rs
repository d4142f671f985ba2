//! HTTP tests for the catalog routes, over the in-memory store

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::CatalogConfig;
use crate::infra::memory::MemoryCatalogRepository;
use crate::presentation::router::catalog_router_generic;

fn app() -> Router {
    catalog_router_generic(MemoryCatalogRepository::new(), CatalogConfig::default())
}

async fn send(router: &Router, req: Request<Body>) -> Response {
    router.clone().oneshot(req).await.unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(res: Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

fn total_count(res: &Response) -> u64 {
    res.headers()
        .get("x-total-count")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap()
}

async fn create(router: &Router, title: &str, category: &str, brand: &str, price: f64) -> Value {
    let res = send(
        router,
        json_request(
            "POST",
            "/products",
            json!({
                "title": title,
                "description": "test product",
                "price": price,
                "discountPercentage": 10,
                "rating": 4.5,
                "stock": 20,
                "category": category,
                "brand": brand,
                "thumbnail": "https://img/thumb.png",
                "images": ["https://img/1.png"]
            }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    body_json(res).await
}

/// Five products: three in `a`, one in `b`, one in `c`
async fn seeded() -> Router {
    let router = app();
    create(&router, "A1", "a", "x", 100.0).await;
    create(&router, "A2", "a", "y", 300.0).await;
    create(&router, "A3", "a", "x", 200.0).await;
    create(&router, "B1", "b", "y", 50.0).await;
    create(&router, "C1", "c", "z", 75.0).await;
    router
}

fn titles(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Products
// ============================================================================

#[tokio::test]
async fn create_product_returns_created() {
    let router = app();
    let body = create(&router, "Phone", "smartphones", "Apple", 549.0).await;

    assert_eq!(body["title"], "Phone");
    assert_eq!(body["deleted"], false);
    assert_eq!(body["discountPrice"], 494.0);
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn create_product_with_invalid_body_is_bad_request() {
    let router = app();

    let res = send(
        &router,
        json_request("POST", "/products", json!({ "title": "No price" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(
        &router,
        json_request(
            "POST",
            "/products",
            json!({ "title": "t", "price": -1, "brand": "b", "category": "c" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_price_is_bad_request() {
    let router = app();

    let res = send(
        &router,
        json_request(
            "POST",
            "/products",
            json!({ "title": "x", "price": 1e27, "brand": "b", "category": "c" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_json(res).await["detail"]
            .as_str()
            .unwrap()
            .contains("price must not exceed")
    );

    let created = create(&router, "Laptop", "laptops", "Dell", 1000.0).await;
    let id = created["id"].as_str().unwrap();
    let res = send(
        &router,
        json_request("PATCH", &format!("/products/{id}"), json!({ "price": 1e27 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(&router, get(&format!("/products/{id}"))).await;
    assert_eq!(body_json(res).await["price"], 1000.0);
}

#[tokio::test]
async fn category_filter_with_total_count() {
    let router = seeded().await;

    let res = send(&router, get("/products?category=a,b")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(total_count(&res), 4);

    let body = body_json(res).await;
    let mut got = titles(&body);
    got.sort();
    assert_eq!(got, vec!["A1", "A2", "A3", "B1"]);
}

#[tokio::test]
async fn empty_filter_list_matches_nothing() {
    let router = seeded().await;

    let res = send(&router, get("/products?category=,")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(total_count(&res), 0);
    assert!(body_json(res).await.as_array().unwrap().is_empty());

    let res = send(&router, get("/products?category=")).await;
    assert_eq!(total_count(&res), 5);
}

#[tokio::test]
async fn total_count_ignores_pagination() {
    let router = seeded().await;

    for (page, expected_len) in [(1, 2), (2, 2), (3, 0)] {
        let res = send(
            &router,
            get(&format!("/products?category=a,b&_page={page}&_limit=2")),
        )
        .await;
        assert_eq!(total_count(&res), 4);
        assert_eq!(body_json(res).await.as_array().unwrap().len(), expected_len);
    }
}

#[tokio::test]
async fn brand_filter_combines_with_category() {
    let router = seeded().await;

    let res = send(&router, get("/products?category=a&brand=x")).await;
    assert_eq!(total_count(&res), 2);

    let mut got = titles(&body_json(res).await);
    got.sort();
    assert_eq!(got, vec!["A1", "A3"]);
}

#[tokio::test]
async fn sort_and_paginate() {
    let router = seeded().await;

    let res = send(
        &router,
        get("/products?_sort=price&_order=desc&_page=1&_limit=3"),
    )
    .await;
    assert_eq!(total_count(&res), 5);
    assert_eq!(titles(&body_json(res).await), vec!["A2", "A3", "A1"]);

    let res = send(
        &router,
        get("/products?_sort=price&_order=desc&_page=2&_limit=3"),
    )
    .await;
    assert_eq!(titles(&body_json(res).await), vec!["C1", "B1"]);
}

#[tokio::test]
async fn invalid_list_parameters_are_bad_request() {
    let router = seeded().await;

    for uri in [
        "/products?_sort=password",
        "/products?_sort=price&_order=sideways",
        "/products?_page=0&_limit=10",
        "/products?_page=abc&_limit=10",
    ] {
        let res = send(&router, get(uri)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn soft_deleted_product_visible_only_to_admin() {
    let router = seeded().await;
    let victim = create(&router, "Gone", "a", "x", 10.0).await;
    let id = victim["id"].as_str().unwrap();

    let res = send(
        &router,
        json_request("PATCH", &format!("/products/{id}"), json!({ "deleted": true })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["deleted"], true);

    let res = send(&router, get("/products?category=a")).await;
    assert_eq!(total_count(&res), 3);
    assert!(!titles(&body_json(res).await).contains(&"Gone".to_string()));

    let res = send(&router, get("/products?category=a&admin=true")).await;
    assert_eq!(total_count(&res), 4);
    assert!(titles(&body_json(res).await).contains(&"Gone".to_string()));
}

#[tokio::test]
async fn get_and_patch_product() {
    let router = app();
    let created = create(&router, "Laptop", "laptops", "Dell", 1000.0).await;
    let id = created["id"].as_str().unwrap();

    let res = send(&router, get(&format!("/products/{id}"))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["title"], "Laptop");

    let res = send(
        &router,
        json_request(
            "PATCH",
            &format!("/products/{id}"),
            json!({ "price": 800, "stock": 3 }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = body_json(res).await;
    assert_eq!(body["price"], 800.0);
    assert_eq!(body["stock"], 3);
    assert_eq!(body["discountPrice"], 720.0);
    assert_eq!(body["title"], "Laptop");
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let router = app();
    let id = kernel::id::ProductId::new();

    let res = send(&router, get(&format!("/products/{id}"))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(
        &router,
        json_request("PATCH", &format!("/products/{id}"), json!({ "stock": 1 })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&router, get("/products/not-a-uuid")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Categories / Brands
// ============================================================================

#[tokio::test]
async fn categories_and_brands() {
    let router = app();

    let res = send(
        &router,
        json_request(
            "POST",
            "/category",
            json!({ "label": "Smartphones", "value": "smartphones" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = send(
        &router,
        json_request("POST", "/brands", json!({ "label": "Apple" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(body_json(res).await["value"], "Apple");

    let res = send(&router, get("/category")).await;
    let body = body_json(res).await;
    assert_eq!(body[0]["value"], "smartphones");

    let res = send(&router, get("/brands")).await;
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_brand_value_rejected() {
    let router = app();
    let body = json!({ "label": "Apple", "value": "apple" });

    let res = send(&router, json_request("POST", "/brands", body.clone())).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = send(&router, json_request("POST", "/brands", body)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
