//! Orders and customers from the storefront API, plus local status updates.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reeldeal_integration_tests::{LOCKED_ORDER_ID, TestContext};
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_order_list_and_search() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let html = client
        .get(ctx.url("/orders"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("ord-1"));
    assert!(html.contains(LOCKED_ORDER_ID));
    assert!(html.contains("$238.99"));

    let html = client
        .get(ctx.url("/orders?q=bo%40example"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains(LOCKED_ORDER_ID));
    assert!(!html.contains("Ana Reyes"));
}

#[tokio::test]
async fn test_order_detail_reads_cart_items() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let html = client
        .get(ctx.url("/orders/ord-1"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Shimano Stradic Reel"));
    assert!(html.contains("Braided Line 20lb"));
    // 2 x $24.50
    assert!(html.contains("$49.00"));
    assert!(html.contains("bank-transfer"));
}

#[tokio::test]
async fn test_unknown_order_redirects_to_list() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let response = client.get(ctx.url("/orders/nope")).send().await.unwrap();
    assert_eq!(response.url().path(), "/orders");
    assert!(response.text().await.unwrap().contains("Order not found"));
}

#[tokio::test]
async fn test_blank_payment_link_never_reaches_storefront() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let response = client
        .post(ctx.url("/orders/ord-1/forward-payment"))
        .form(&[("payment_link", "   "), ("notes", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.url().path(), "/orders/ord-1");
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Please provide a payment link")
    );
    assert!(ctx.storefront.forwarded().is_empty());
}

#[tokio::test]
async fn test_forward_payment_confirms_order() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let response = client
        .post(ctx.url("/orders/ord-1/forward-payment"))
        .form(&[
            ("payment_link", "https://pay.example.com/inv/881"),
            ("notes", "Thanks for your order!"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(response.url().path(), "/orders");
    assert!(
        response
            .text()
            .await
            .unwrap()
            .contains("Order confirmed and email sent!")
    );

    let forwarded = ctx.storefront.forwarded();
    assert_eq!(forwarded.len(), 1);
    let (order_id, body) = &forwarded[0];
    assert_eq!(order_id, "ord-1");
    assert_eq!(body["paymentLink"], "https://pay.example.com/inv/881");
    assert_eq!(body["notes"], "Thanks for your order!");
}

#[tokio::test]
async fn test_forward_payment_surfaces_api_message() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let html = client
        .post(ctx.url(&format!("/orders/{LOCKED_ORDER_ID}/forward-payment")))
        .form(&[("payment_link", "https://pay.example.com/inv/9"), ("notes", "")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Order already confirmed"));
}

#[tokio::test]
async fn test_storefront_outage_degrades_to_empty_list() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;
    ctx.storefront.take_orders_down();

    let response = client.get(ctx.url("/orders")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.unwrap();
    assert!(html.contains("Failed to load orders"));
    assert!(html.contains("No orders found"));
}

#[tokio::test]
async fn test_customer_detail_lists_their_orders() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let html = client
        .get(ctx.url("/customers?q=ana"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Ana Reyes"));
    assert!(!html.contains("Bo Lindqvist"));

    let html = client
        .get(ctx.url("/customers/u-1"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("ana@example.com"));
    assert!(html.contains("ord-1"));
    assert!(!html.contains(LOCKED_ORDER_ID));
}

#[tokio::test]
async fn test_update_local_order_status() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let response = client
        .patch(ctx.url("/api/orders/RD-1001/status"))
        .json(&json!({ "status": "shipped", "trackingNumber": "1Z999AA10123456784" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let order: Value = response.json().await.unwrap();
    assert_eq!(order["status"], "shipped");
    assert_eq!(order["trackingNumber"], "1Z999AA10123456784");

    // Blank tracking number keeps the existing one
    let order: Value = client
        .patch(ctx.url("/api/orders/RD-1001/status"))
        .json(&json!({ "status": "delivered", "trackingNumber": "" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(order["status"], "delivered");
    assert_eq!(order["trackingNumber"], "1Z999AA10123456784");

    let response = client
        .patch(ctx.url("/api/orders/RD-0000/status"))
        .json(&json!({ "status": "shipped" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
