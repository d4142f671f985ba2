//! Use-case and HTTP tests for the checkout crate, over in-memory stores
//! and a recording payment gateway

use std::sync::{Arc, Mutex};

use auth::domain::value_object::user_role::UserRole;
use auth::middleware::AuthMiddlewareState;
use auth::presentation::handlers::AuthAppState;
use auth::{AuthConfig, MemoryAuthRepository, auth_routes};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use catalog::domain::entity::ProductDraft;
use catalog::domain::repository::ProductRepository;
use catalog::{MemoryCatalogRepository, Product};
use chrono::Utc;
use kernel::id::{OrderId, ProductId, UserId};
use rust_decimal::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::application::config::PaymentConfig;
use crate::application::webhook::{PAYMENT_SUCCEEDED, SIGNATURE_HEADER, signature_header};
use crate::application::{PaymentUseCase, WebhookOutcome};
use crate::domain::entity::Order;
use crate::domain::gateway::PaymentGateway;
use crate::domain::repository::OrderRepository;
use crate::domain::value_object::{IntentRequest, PaymentIntent, PaymentStatus};
use crate::error::CheckoutResult;
use crate::infra::memory::MemoryCheckoutRepository;
use crate::presentation::router::checkout_router_generic;

const PASSWORD: &str = "s3cret-passphrase";
const WEBHOOK_SECRET: &str = "whsec_test_secret";

#[derive(Clone, Default)]
struct RecordingGateway {
    requests: Arc<Mutex<Vec<IntentRequest>>>,
}

impl PaymentGateway for RecordingGateway {
    async fn create_intent(&self, request: &IntentRequest) -> CheckoutResult<PaymentIntent> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(PaymentIntent {
            id: "pi_test".into(),
            client_secret: format!("pi_test_secret_{}", request.amount_minor),
        })
    }
}

fn payment_config() -> PaymentConfig {
    PaymentConfig {
        secret_key: "sk_test_unused".into(),
        webhook_secret: WEBHOOK_SECRET.into(),
        ..Default::default()
    }
}

struct TestApp {
    router: Router,
    auth: MemoryAuthRepository,
    catalog: MemoryCatalogRepository,
    checkout: MemoryCheckoutRepository,
    gateway: RecordingGateway,
}

fn app() -> TestApp {
    let auth = MemoryAuthRepository::new();
    let auth_config = Arc::new(AuthConfig {
        pbkdf2_rounds: 1_000,
        cookie_secure: false,
        ..AuthConfig::with_random_secrets()
    });
    let catalog = MemoryCatalogRepository::new();
    let checkout = MemoryCheckoutRepository::new(catalog.clone());
    let gateway = RecordingGateway::default();

    let guard = AuthMiddlewareState::new(Arc::new(auth.clone()), auth_config.clone());
    let router = Router::new()
        .nest(
            "/auth",
            auth_routes(AuthAppState::new(Arc::new(auth.clone()), auth_config)),
        )
        .merge(checkout_router_generic(
            checkout.clone(),
            gateway.clone(),
            payment_config(),
            guard,
        ));

    TestApp {
        router,
        auth,
        catalog,
        checkout,
        gateway,
    }
}

async fn send(router: &Router, req: Request<Body>) -> Response {
    router.clone().oneshot(req).await.unwrap()
}

fn request(method: &str, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn body_json(res: Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

fn cookie_header(res: &Response) -> String {
    res.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Signed-in caller: cookie header plus id
struct Caller {
    cookie: String,
    id: UserId,
}

async fn sign_up(app: &TestApp, email: &str) -> Caller {
    let res = send(
        &app.router,
        request(
            "POST",
            "/auth/signup",
            Some(json!({
                "email": email,
                "password": PASSWORD,
                "addresses": [{ "name": "Asha", "street": "12 MG Road", "city": "Pune", "pinCode": "411001" }]
            })),
            None,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let cookie = cookie_header(&res);
    let id = body_json(res).await["id"].as_str().unwrap().parse().unwrap();
    Caller { cookie, id }
}

async fn admin(app: &TestApp, email: &str) -> Caller {
    let caller = sign_up(app, email).await;
    app.auth.set_role(&caller.id, UserRole::Admin).await;

    let res = send(
        &app.router,
        request(
            "POST",
            "/auth/login",
            Some(json!({ "email": email, "password": PASSWORD })),
            None,
        ),
    )
    .await;
    Caller {
        cookie: cookie_header(&res),
        id: caller.id,
    }
}

async fn product(app: &TestApp, title: &str, price: rust_decimal::Decimal, stock: i32) -> Product {
    let product = Product::create(ProductDraft {
        title: title.into(),
        price,
        stock,
        brand: "acme".into(),
        category: "gadgets".into(),
        ..Default::default()
    })
    .unwrap();
    app.catalog.create_product(&product).await.unwrap();
    product
}

async fn add_to_cart(app: &TestApp, caller: &Caller, product: ProductId, quantity: i32) -> Response {
    send(
        &app.router,
        request(
            "POST",
            "/cart",
            Some(json!({ "product": product.to_string(), "quantity": quantity })),
            Some(&caller.cookie),
        ),
    )
    .await
}

async fn place_order(app: &TestApp, caller: &Caller) -> Response {
    send(
        &app.router,
        request(
            "POST",
            "/orders",
            Some(json!({ "paymentMethod": "card" })),
            Some(&caller.cookie),
        ),
    )
    .await
}

fn webhook_request(payload: &Value, signature: Option<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(signature) = signature {
        builder = builder.header(SIGNATURE_HEADER, signature);
    }
    builder.body(Body::from(payload.to_string())).unwrap()
}

fn succeeded_event(order_id: &str) -> Value {
    json!({
        "id": "evt_1",
        "type": PAYMENT_SUCCEEDED,
        "data": { "object": { "id": "pi_test", "metadata": { "order_id": order_id } } }
    })
}

fn signed(payload: &Value) -> String {
    signature_header(
        payload.to_string().as_bytes(),
        WEBHOOK_SECRET,
        Utc::now().timestamp(),
    )
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn cart_requires_authentication() {
    let app = app();
    let res = send(&app.router, request("GET", "/cart", None, None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn add_to_cart_merges_lines_for_same_product() {
    let app = app();
    let asha = sign_up(&app, "asha@example.com").await;
    let phone = product(&app, "Phone", dec!(500), 10).await;

    let first = add_to_cart(&app, &asha, phone.id, 1).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await;
    assert_eq!(first["product"]["title"], "Phone");

    let second = body_json(add_to_cart(&app, &asha, phone.id, 2).await).await;
    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["quantity"], 3);

    let res = send(&app.router, request("GET", "/cart", None, Some(&asha.cookie))).await;
    let lines = body_json(res).await;
    assert_eq!(lines.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn merged_line_cannot_exceed_quantity_bound() {
    let app = app();
    let asha = sign_up(&app, "asha@example.com").await;
    let phone = product(&app, "Phone", dec!(500), 10).await;

    let first = add_to_cart(&app, &asha, phone.id, 1000).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = add_to_cart(&app, &asha, phone.id, 1000).await;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(second).await["detail"],
        "A cart line cannot hold more than 1000 items"
    );

    let res = send(&app.router, request("GET", "/cart", None, Some(&asha.cookie))).await;
    assert_eq!(body_json(res).await[0]["quantity"], 1000);
}

#[tokio::test]
async fn add_unknown_or_deleted_product_is_not_found() {
    let app = app();
    let asha = sign_up(&app, "asha@example.com").await;

    let res = add_to_cart(&app, &asha, ProductId::new(), 1).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let gone = product(&app, "Gone", dec!(10), 5).await;
    app.catalog
        .update_product(
            &gone.id,
            &catalog::domain::entity::ProductPatch {
                deleted: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let res = add_to_cart(&app, &asha, gone.id, 1).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_quantity_is_bad_request() {
    let app = app();
    let asha = sign_up(&app, "asha@example.com").await;
    let phone = product(&app, "Phone", dec!(500), 10).await;

    let res = add_to_cart(&app, &asha, phone.id, 0).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_and_remove_cart_line() {
    let app = app();
    let asha = sign_up(&app, "asha@example.com").await;
    let phone = product(&app, "Phone", dec!(500), 10).await;
    let line = body_json(add_to_cart(&app, &asha, phone.id, 1).await).await;
    let uri = format!("/cart/{}", line["id"].as_str().unwrap());

    let res = send(
        &app.router,
        request("PATCH", &uri, Some(json!({ "quantity": 4 })), Some(&asha.cookie)),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["quantity"], 4);

    let res = send(&app.router, request("DELETE", &uri, None, Some(&asha.cookie))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["quantity"], 4);

    let res = send(&app.router, request("GET", "/cart", None, Some(&asha.cookie))).await;
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn other_users_lines_are_not_found() {
    let app = app();
    let asha = sign_up(&app, "asha@example.com").await;
    let ravi = sign_up(&app, "ravi@example.com").await;
    let phone = product(&app, "Phone", dec!(500), 10).await;
    let line = body_json(add_to_cart(&app, &asha, phone.id, 1).await).await;
    let uri = format!("/cart/{}", line["id"].as_str().unwrap());

    let res = send(
        &app.router,
        request("PATCH", &uri, Some(json!({ "quantity": 2 })), Some(&ravi.cookie)),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app.router, request("DELETE", &uri, None, Some(&ravi.cookie))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&app.router, request("GET", "/cart", None, Some(&ravi.cookie))).await;
    assert_eq!(body_json(res).await, json!([]));
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn placing_order_takes_stock_and_clears_cart() {
    let app = app();
    let asha = sign_up(&app, "asha@example.com").await;
    let phone = product(&app, "Phone", dec!(500), 10).await;
    let case = product(&app, "Case", dec!(20), 3).await;
    add_to_cart(&app, &asha, phone.id, 2).await;
    add_to_cart(&app, &asha, case.id, 1).await;

    let res = place_order(&app, &asha).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let order = body_json(res).await;
    assert_eq!(order["totalAmount"], 1020.0);
    assert_eq!(order["totalItems"], 3);
    assert_eq!(order["paymentMethod"], "card");
    assert_eq!(order["paymentStatus"], "pending");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["user"], asha.id.to_string());
    assert_eq!(order["selectedAddress"]["city"], "Pune");

    let phone = app.catalog.find_product(&phone.id).await.unwrap().unwrap();
    assert_eq!(phone.stock, 8);

    let res = send(&app.router, request("GET", "/cart", None, Some(&asha.cookie))).await;
    assert_eq!(body_json(res).await, json!([]));

    let res = send(&app.router, request("GET", "/orders/own", None, Some(&asha.cookie))).await;
    let own = body_json(res).await;
    assert_eq!(own.as_array().unwrap().len(), 1);
    assert_eq!(own[0]["id"], order["id"]);
}

#[tokio::test]
async fn empty_cart_cannot_be_ordered() {
    let app = app();
    let asha = sign_up(&app, "asha@example.com").await;

    let res = place_order(&app, &asha).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(res).await["detail"], "Cart is empty");
}

#[tokio::test]
async fn ordering_more_than_stock_fails_and_keeps_cart() {
    let app = app();
    let asha = sign_up(&app, "asha@example.com").await;
    let scarce = product(&app, "Scarce", dec!(10), 1).await;
    add_to_cart(&app, &asha, scarce.id, 2).await;

    let res = place_order(&app, &asha).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let scarce = app.catalog.find_product(&scarce.id).await.unwrap().unwrap();
    assert_eq!(scarce.stock, 1);
    let res = send(&app.router, request("GET", "/cart", None, Some(&asha.cookie))).await;
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn order_admin_routes_require_admin_role() {
    let app = app();
    let asha = sign_up(&app, "asha@example.com").await;

    let res = send(&app.router, request("GET", "/orders", None, Some(&asha.cookie))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let uri = format!("/orders/{}", OrderId::new());
    let res = send(
        &app.router,
        request("PATCH", &uri, Some(json!({ "status": "dispatched" })), Some(&asha.cookie)),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = send(&app.router, request("DELETE", &uri, None, Some(&asha.cookie))).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_lists_pages_and_updates_orders() {
    let app = app();
    let boss = admin(&app, "boss@example.com").await;
    let phone = product(&app, "Phone", dec!(100), 50).await;

    for (email, quantity) in [("a@example.com", 1), ("b@example.com", 3), ("c@example.com", 2)] {
        let caller = sign_up(&app, email).await;
        add_to_cart(&app, &caller, phone.id, quantity).await;
        assert_eq!(place_order(&app, &caller).await.status(), StatusCode::CREATED);
    }

    let res = send(
        &app.router,
        request(
            "GET",
            "/orders?_sort=totalAmount&_order=desc&_page=1&_limit=2",
            None,
            Some(&boss.cookie),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["x-total-count"], "3");
    let page = body_json(res).await;
    let totals: Vec<f64> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["totalAmount"].as_f64().unwrap())
        .collect();
    assert_eq!(totals, vec![300.0, 200.0]);

    let uri = format!("/orders/{}", page[0]["id"].as_str().unwrap());
    let res = send(
        &app.router,
        request("PATCH", &uri, Some(json!({ "status": "dispatched" })), Some(&boss.cookie)),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = body_json(res).await;
    assert_eq!(updated["status"], "dispatched");
    assert_eq!(updated["items"], page[0]["items"]);

    let res = send(&app.router, request("DELETE", &uri, None, Some(&boss.cookie))).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = send(&app.router, request("DELETE", &uri, None, Some(&boss.cookie))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_sort_field_is_bad_request() {
    let app = app();
    let boss = admin(&app, "boss@example.com").await;

    let res = send(
        &app.router,
        request("GET", "/orders?_sort=user_id", None, Some(&boss.cookie)),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Payment intents
// ============================================================================

async fn placed_order(app: &TestApp) -> Value {
    let asha = sign_up(app, "asha@example.com").await;
    let phone = product(app, "Phone", dec!(478.5), 10).await;
    add_to_cart(app, &asha, phone.id, 1).await;
    body_json(place_order(app, &asha).await).await
}

#[tokio::test]
async fn payment_intent_returns_client_secret() {
    let app = app();
    let order = placed_order(&app).await;

    let res = send(
        &app.router,
        request(
            "POST",
            "/create-payment-intent",
            Some(json!({ "totalAmount": order["totalAmount"], "orderId": order["id"] })),
            None,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["clientSecret"], "pi_test_secret_47900");

    let requests = app.gateway.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].amount_minor, 47_900);
    assert_eq!(requests[0].currency, "inr");
    assert_eq!(requests[0].order_id.to_string(), order["id"].as_str().unwrap());
}

#[tokio::test]
async fn payment_intent_accepts_legacy_order_id_key() {
    let app = app();
    let order = placed_order(&app).await;

    let res = send(
        &app.router,
        request(
            "POST",
            "/create-payment-intent",
            Some(json!({ "totalAmount": order["totalAmount"], "OrderId": order["id"] })),
            None,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn payment_intent_validation() {
    let app = app();
    let order = placed_order(&app).await;

    let cases = [
        (json!({ "orderId": order["id"] }), StatusCode::BAD_REQUEST),
        (json!({ "totalAmount": 10 }), StatusCode::BAD_REQUEST),
        (json!({ "totalAmount": 0, "orderId": order["id"] }), StatusCode::BAD_REQUEST),
        (json!({ "totalAmount": 1, "orderId": order["id"] }), StatusCode::BAD_REQUEST),
        (
            json!({ "totalAmount": 1e28, "orderId": OrderId::new().to_string() }),
            StatusCode::BAD_REQUEST,
        ),
        (
            json!({ "totalAmount": 10, "orderId": OrderId::new().to_string() }),
            StatusCode::NOT_FOUND,
        ),
    ];
    for (body, status) in cases {
        let res = send(
            &app.router,
            request("POST", "/create-payment-intent", Some(body.clone()), None),
        )
        .await;
        assert_eq!(res.status(), status, "{body}");
    }
    assert!(app.gateway.requests.lock().unwrap().is_empty());
}

// ============================================================================
// Webhook
// ============================================================================

#[tokio::test]
async fn signed_success_event_marks_payment_received() {
    let app = app();
    let order = placed_order(&app).await;
    let order_id: OrderId = order["id"].as_str().unwrap().parse().unwrap();
    let before = app.checkout.find_order(&order_id).await.unwrap().unwrap();

    let payload = succeeded_event(order["id"].as_str().unwrap());
    let res = send(&app.router, webhook_request(&payload, Some(signed(&payload)))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["received"], true);

    let stored = app.checkout.find_order(&order_id).await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Received);
    assert_eq!(
        stored,
        Order {
            payment_status: PaymentStatus::Received,
            ..before
        }
    );
}

#[tokio::test]
async fn bad_or_missing_signature_is_rejected() {
    let app = app();
    let order = placed_order(&app).await;
    let order_id: OrderId = order["id"].as_str().unwrap().parse().unwrap();
    let payload = succeeded_event(order["id"].as_str().unwrap());

    let forged = signature_header(
        payload.to_string().as_bytes(),
        "whsec_wrong",
        Utc::now().timestamp(),
    );
    let res = send(&app.router, webhook_request(&payload, Some(forged))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_json(res).await["detail"]
            .as_str()
            .unwrap()
            .starts_with("Webhook Error:")
    );

    let res = send(&app.router, webhook_request(&payload, None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let stored = app.checkout.find_order(&order_id).await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn other_event_types_are_acknowledged_without_changes() {
    let app = app();
    let order = placed_order(&app).await;
    let order_id: OrderId = order["id"].as_str().unwrap().parse().unwrap();

    let payload = json!({
        "id": "evt_2",
        "type": "payment_intent.created",
        "data": { "object": { "metadata": { "order_id": order["id"] } } }
    });
    let res = send(&app.router, webhook_request(&payload, Some(signed(&payload)))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let stored = app.checkout.find_order(&order_id).await.unwrap().unwrap();
    assert_eq!(stored.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn success_for_unknown_order_is_acknowledged() {
    let app = app();
    let payload = succeeded_event(&OrderId::new().to_string());

    let res = send(&app.router, webhook_request(&payload, Some(signed(&payload)))).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn webhook_outcomes_from_use_case() {
    let catalog = MemoryCatalogRepository::new();
    let repo = Arc::new(MemoryCheckoutRepository::new(catalog));
    let payments = PaymentUseCase::new(
        repo,
        Arc::new(RecordingGateway::default()),
        Arc::new(payment_config()),
    );

    let payload = json!({ "type": "charge.refunded", "data": { "object": {} } });
    let outcome = payments
        .handle_webhook(payload.to_string().as_bytes(), Some(&signed(&payload)))
        .await
        .unwrap();
    assert_eq!(outcome, WebhookOutcome::Ignored("charge.refunded".into()));

    let payload = json!({ "type": PAYMENT_SUCCEEDED, "data": { "object": { "metadata": {} } } });
    let outcome = payments
        .handle_webhook(payload.to_string().as_bytes(), Some(&signed(&payload)))
        .await
        .unwrap();
    assert_eq!(outcome, WebhookOutcome::UnknownOrder);
}
