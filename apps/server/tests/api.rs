//! End-to-end tests driving the router directly, no sockets involved.
//!
//! Every test builds its own `AppState`, so the in-memory stores never leak
//! between tests. Simulated latencies are set to zero.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use deliverypro_server::config::AppConfig;
use deliverypro_server::routes::router;
use deliverypro_server::state::AppState;

/// A fresh app with zeroed simulated delays.
fn app() -> Router {
    let mut config = AppConfig::default();
    config.submit_delay_ms = 0;
    config.chat_reply_delay_ms = 0;
    router(AppState::new(config))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read failed");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request build failed");
    send(app, request).await
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request build failed");
    send(app, request).await
}

async fn open_session(app: &Router) -> String {
    let (status, body) = send_json(app, "POST", "/api/sessions", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    body["sessionId"].as_str().expect("no session id").to_string()
}

// =============================================================================
// Health & restaurant
// =============================================================================

#[tokio::test]
async fn health_answers_ok() {
    let app = app();
    let (status, body) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn restaurant_profile_is_served() {
    let app = app();
    let (status, body) = get(&app, "/api/restaurant").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Pizzaria Demo");
    assert_eq!(body["deliveryFeeCents"], 590);
    assert_eq!(body["isOpen"], true);
}

// =============================================================================
// Menu
// =============================================================================

#[tokio::test]
async fn menu_listing_and_filters() {
    let app = app();

    let (status, body) = get(&app, "/api/menu").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(9));

    let (_, pizzas) = get(&app, "/api/menu?category=Pizzas").await;
    assert_eq!(pizzas.as_array().map(Vec::len), Some(3));

    let (_, popular) = get(&app, "/api/menu?popular=true").await;
    assert_eq!(popular.as_array().map(Vec::len), Some(3));

    let (_, search) = get(&app, "/api/menu?q=margherita").await;
    assert_eq!(search.as_array().map(Vec::len), Some(1));
    assert_eq!(search[0]["name"], "Pizza Margherita");

    let (_, categories) = get(&app, "/api/menu/categories").await;
    assert_eq!(
        categories,
        json!(["Pizzas", "Hambúrguers", "Acompanhamentos", "Bebidas"])
    );
}

#[tokio::test]
async fn menu_update_edits_and_validates() {
    let app = app();

    let (status, body) = send_json(
        &app,
        "PUT",
        "/api/menu/1",
        json!({ "priceCents": 4790, "available": false }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priceCents"], 4790);
    assert_eq!(body["available"], false);
    assert_eq!(body["name"], "Pizza Margherita");

    let (status, _) = send_json(&app, "PUT", "/api/menu/999", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) =
        send_json(&app, "PUT", "/api/menu/2", json!({ "priceCents": -1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Cart
// =============================================================================

#[tokio::test]
async fn cart_flow_totals() {
    let app = app();
    let sid = open_session(&app).await;

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/cart/items"),
        json!({ "productId": "1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totals"]["subtotalCents"], 4590);
    assert_eq!(body["totals"]["totalCents"], 5180);

    // same product again: one line, quantity 2
    let (_, body) = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/cart/items"),
        json!({ "productId": "1" }),
    )
    .await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["totals"]["totalCents"], 9770);

    // quantity 0 removes the line; the fee never applies on its own
    let (_, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/sessions/{sid}/cart/items/1"),
        json!({ "quantity": 0 }),
    )
    .await;
    assert_eq!(body["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["totals"]["totalCents"], 0);
}

#[tokio::test]
async fn cart_rejects_unknown_session_and_product() {
    let app = app();

    let (status, _) = get(&app, "/api/sessions/nope/cart").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let sid = open_session(&app).await;
    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/cart/items"),
        json!({ "productId": "999" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Checkout
// =============================================================================

async fn fill_step1(app: &Router, sid: &str) {
    let (status, _) = send_json(
        app,
        "PUT",
        &format!("/api/sessions/{sid}/checkout/customer"),
        json!({ "name": "João Silva", "email": "joao@example.com", "phone": "(11) 99999-9999" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send_json(
        app,
        "PUT",
        &format!("/api/sessions/{sid}/checkout/address"),
        json!({
            "street": "Rua das Flores",
            "number": "123",
            "complement": null,
            "neighborhood": "Vila Madalena",
            "city": "São Paulo",
            "state": "SP",
            "zipCode": "05433-000"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn checkout_gates_next_step() {
    let app = app();
    let sid = open_session(&app).await;

    // nothing filled: blocked, step stays 1
    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/checkout/next"),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, view) = get(&app, &format!("/api/sessions/{sid}/checkout")).await;
    assert_eq!(view["step"], 1);

    fill_step1(&app, &sid).await;
    let (status, view) = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/checkout/next"),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["step"], 2);
}

#[tokio::test]
async fn checkout_goto_bypasses_validation() {
    let app = app();
    let sid = open_session(&app).await;

    let (status, view) = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/checkout/goto"),
        json!({ "step": 3 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["step"], 3);
    // the indicator still reports step 1 as invalid
    assert_eq!(view["steps"][0]["valid"], false);

    let (status, _) = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/checkout/goto"),
        json!({ "step": 7 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn checkout_submit_end_to_end() {
    let app = app();
    let sid = open_session(&app).await;

    send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/cart/items"),
        json!({ "productId": "1" }),
    )
    .await;

    fill_step1(&app, &sid).await;
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/sessions/{sid}/checkout/payment"),
        json!({ "method": "pix" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, order) = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/checkout/submit"),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["subtotalCents"], 4590);
    assert_eq!(order["totalCents"], 5180);
    assert!(order["number"].as_str().unwrap().starts_with("ORD-"));

    // the cart was cleared
    let (_, cart) = get(&app, &format!("/api/sessions/{sid}/cart")).await;
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(0));

    // the order landed on the board
    let order_id = order["id"].as_str().unwrap();
    let (_, listed) = get(&app, "/api/orders?status=pending").await;
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .any(|o| o["id"] == order_id));
}

#[tokio::test]
async fn checkout_submit_pickup_skips_address_and_fee() {
    let app = app();
    let sid = open_session(&app).await;

    send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/cart/items"),
        json!({ "productId": "1" }),
    )
    .await;

    send_json(
        &app,
        "PUT",
        &format!("/api/sessions/{sid}/checkout/options"),
        json!({ "deliveryOption": "pickup" }),
    )
    .await;
    send_json(
        &app,
        "PUT",
        &format!("/api/sessions/{sid}/checkout/customer"),
        json!({ "name": "João Silva", "email": "joao@example.com", "phone": "(11) 99999-9999" }),
    )
    .await;
    send_json(
        &app,
        "PUT",
        &format!("/api/sessions/{sid}/checkout/payment"),
        json!({ "method": "pix" }),
    )
    .await;

    let (status, order) = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/checkout/submit"),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["deliveryFeeCents"], 0);
    assert_eq!(order["totalCents"], 4590);
    assert_eq!(order["address"], Value::Null);
}

#[tokio::test]
async fn checkout_submit_rejects_empty_cart() {
    let app = app();
    let sid = open_session(&app).await;

    fill_step1(&app, &sid).await;
    send_json(
        &app,
        "PUT",
        &format!("/api/sessions/{sid}/checkout/payment"),
        json!({ "method": "pix" }),
    )
    .await;

    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/sessions/{sid}/checkout/submit"),
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "CHECKOUT_ERROR");
}

// =============================================================================
// Order board
// =============================================================================

#[tokio::test]
async fn order_board_listing_and_transitions() {
    let app = app();

    let (status, body) = get(&app, "/api/orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(4));

    let (_, pending) = get(&app, "/api/orders?status=pending").await;
    assert_eq!(pending.as_array().map(Vec::len), Some(1));

    // accept the pending demo order
    let (status, order) = send_json(
        &app,
        "POST",
        "/api/orders/demo-1/status",
        json!({ "status": "confirmed" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "confirmed");

    // delivered orders accept no further moves
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/orders/demo-4/status",
        json!({ "status": "preparing" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "BUSINESS_LOGIC");

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/orders/missing/status",
        json!({ "status": "confirmed" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_summary_counts_every_status() {
    let app = app();
    let (status, body) = get(&app, "/api/orders/summary").await;
    assert_eq!(status, StatusCode::OK);

    let buckets = body.as_array().unwrap();
    assert_eq!(buckets.len(), 6);
    let count_of = |status: &str| {
        buckets
            .iter()
            .find(|b| b["status"] == status)
            .and_then(|b| b["count"].as_u64())
            .unwrap()
    };
    assert_eq!(count_of("pending"), 1);
    assert_eq!(count_of("delivered"), 1);
    assert_eq!(count_of("cancelled"), 0);
}

// =============================================================================
// Analytics
// =============================================================================

#[tokio::test]
async fn analytics_report_aggregates_the_board() {
    let app = app();
    let (status, body) = get(&app, "/api/analytics").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["summary"]["orderCount"], 4);
    assert_eq!(body["summary"]["cancelledCount"], 0);
    assert!(body["summary"]["revenueCents"].as_i64().unwrap() > 0);
    assert_eq!(body["ordersByHour"].as_array().map(Vec::len), Some(24));
    assert!(!body["topProducts"].as_array().unwrap().is_empty());
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn chat_scripted_reply() {
    let app = app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/chat/messages",
        json!({ "content": "quanto custa a margherita?" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"]["sender"], "customer");
    assert_eq!(body["reply"]["sender"], "bot");
    assert!(body["reply"]["content"]
        .as_str()
        .unwrap()
        .contains("R$ 35,90"));

    // greeting + exchange
    let (_, log) = get(&app, "/api/chat/messages").await;
    assert_eq!(log.as_array().map(Vec::len), Some(3));

    let (status, _) = send_json(&app, "POST", "/api/chat/messages", json!({ "content": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Image proxy
// =============================================================================

#[tokio::test]
async fn image_generation_requires_configuration() {
    let app = app();

    // no description
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/images/generate",
        json!({ "description": "" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // no API key configured in the default test config
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/images/generate",
        json!({ "description": "pizza de calabresa", "name": "Calabresa" }),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
}
