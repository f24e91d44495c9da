//! Router-level tests for the cart, checkout, and account surface.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use shopflow::{AppState, ServerConfig};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(seed: bool) -> Router {
    let config = Arc::new(ServerConfig {
        http_bind_address: "127.0.0.1:0".parse().unwrap(),
        seed_demo_data: seed,
    });
    let state = Arc::new(AppState::new(config));
    shopflow::app_router(state)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn send(router: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn guest_cart_merges_duplicate_lines_and_embeds_products() {
    let app = test_app(true);

    let (status, first) = send(
        &app,
        "POST",
        "/api/cart",
        json!({ "productId": 1, "quantity": 2, "sessionId": "s1" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let line_id = first["id"].clone();

    let (_, second) = send(
        &app,
        "POST",
        "/api/cart",
        json!({ "productId": 1, "quantity": 1, "sessionId": "s1" }),
    )
    .await;
    assert_eq!(second["id"], line_id);
    assert_eq!(second["quantity"], 3);

    let (status, cart) = get(&app, "/api/cart?sessionId=s1").await;
    assert_eq!(status, StatusCode::OK);
    let items = cart.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["product"]["name"], "Wireless Headphones");
    assert_eq!(items[0]["userId"], Value::Null);
}

#[tokio::test]
async fn cart_rejects_missing_owner_and_non_positive_quantity() {
    let app = test_app(true);

    let (status, error) = send(
        &app,
        "POST",
        "/api/cart",
        json!({ "productId": 1, "quantity": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "validation_error");

    let (status, error) = send(
        &app,
        "POST",
        "/api/cart",
        json!({ "productId": 1, "quantity": 0, "sessionId": "s1" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "validation_error");
}

#[tokio::test]
async fn cart_lines_are_updatable_and_removable() {
    let app = test_app(true);

    let (_, line) = send(
        &app,
        "POST",
        "/api/cart",
        json!({ "productId": 3, "quantity": 1, "sessionId": "s2" }),
    )
    .await;
    let id = line["id"].as_u64().unwrap();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/cart/{id}"),
        json!({ "quantity": 4 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["quantity"], 4);

    let (status, removed) = send(&app, "DELETE", &format!("/api/cart/{id}"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["success"], true);

    let (status, error) = send(&app, "DELETE", &format!("/api/cart/{id}"), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "not_found");
}

#[tokio::test]
async fn clearing_a_cart_always_reports_success() {
    let app = test_app(true);
    send(
        &app,
        "POST",
        "/api/cart",
        json!({ "productId": 1, "quantity": 1, "sessionId": "s3" }),
    )
    .await;

    let (status, body) = send(&app, "DELETE", "/api/cart?sessionId=s3", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, cart) = get(&app, "/api/cart?sessionId=s3").await;
    assert!(cart.as_array().unwrap().is_empty());

    // Nothing left to clear, still success.
    let (status, body) = send(&app, "DELETE", "/api/cart?sessionId=s3", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn checkout_creates_order_with_lines_and_clears_the_cart() {
    let app = test_app(true);

    send(
        &app,
        "POST",
        "/api/cart",
        json!({ "productId": 1, "quantity": 2, "sessionId": "s4" }),
    )
    .await;

    let (status, order) = send(
        &app,
        "POST",
        "/api/orders",
        json!({
            "userId": null,
            "status": "pending",
            "total": "280.78",
            "shippingAddress": "1 Main St, Springfield, 12345",
            "sessionId": "s4",
            "items": [
                { "productId": 1, "quantity": 2, "price": "129.99" }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["id"], 1);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["total"], "280.78");
    assert_eq!(order["userId"], Value::Null);
    assert!(order["createdAt"].is_string());

    let items = order["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["price"], "129.99");
    assert_eq!(items[0]["product"]["name"], "Wireless Headphones");

    // The originating cart is emptied by the checkout.
    let (_, cart) = get(&app, "/api/cart?sessionId=s4").await;
    assert!(cart.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn order_status_updates_leave_totals_untouched() {
    let app = test_app(true);

    let (_, order) = send(
        &app,
        "POST",
        "/api/orders",
        json!({
            "userId": 2,
            "total": "21.98",
            "shippingAddress": "1 Main St",
            "items": []
        }),
    )
    .await;
    let id = order["id"].as_u64().unwrap();
    let created_at = order["createdAt"].clone();
    // Status defaulted to pending.
    assert_eq!(order["status"], "pending");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/orders/{id}/status"),
        json!({ "status": "shipped" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "shipped");
    assert_eq!(updated["total"], "21.98");
    assert_eq!(updated["createdAt"], created_at);
    // The placing user is embedded for the admin view.
    assert_eq!(updated["user"]["username"], "john_doe");

    let (status, error) = send(
        &app,
        "PUT",
        "/api/orders/99/status",
        json!({ "status": "shipped" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "not_found");
}

#[tokio::test]
async fn order_listing_filters_by_user() {
    let app = test_app(true);

    for (user, total) in [(json!(2), "1.00"), (Value::Null, "2.00"), (json!(2), "3.00")] {
        send(
            &app,
            "POST",
            "/api/orders",
            json!({
                "userId": user,
                "total": total,
                "shippingAddress": "1 Main St",
                "items": []
            }),
        )
        .await;
    }

    let (_, all) = get(&app, "/api/orders").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, johns) = get(&app, "/api/orders?userId=2").await;
    assert_eq!(johns.as_array().unwrap().len(), 2);

    let (status, one) = get(&app, "/api/orders/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["total"], "2.00");
    assert_eq!(one["user"], Value::Null);
}

#[tokio::test]
async fn registration_forces_non_admin_and_rejects_duplicates() {
    let app = test_app(true);

    let (status, user) = send(
        &app,
        "POST",
        "/api/users",
        json!({
            "username": "jane",
            "password": "secret",
            "email": "jane@example.com",
            "firstName": "Jane",
            "lastName": "Doe",
            "isAdmin": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["id"], 3);
    // The isAdmin flag in the payload is ignored.
    assert_eq!(user["isAdmin"], false);

    let (status, error) = send(
        &app,
        "POST",
        "/api/users",
        json!({
            "username": "jane",
            "password": "other",
            "email": "jane2@example.com",
            "firstName": "Jane",
            "lastName": "Doe"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "conflict");

    let (status, error) = send(
        &app,
        "POST",
        "/api/users",
        json!({
            "username": "jane3",
            "password": "other",
            "email": "jane@example.com",
            "firstName": "Jane",
            "lastName": "Doe"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "conflict");

    let (_, users) = get(&app, "/api/users").await;
    assert_eq!(users.as_array().unwrap().len(), 3);
}
