//! Categories and products, on screen and through the JSON API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reeldeal_integration_tests::TestContext;
use reqwest::StatusCode;
use serde_json::{Value, json};

#[tokio::test]
async fn test_add_and_delete_category() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let response = client
        .post(ctx.url("/categories"))
        .form(&[("name", "  Fly Fishing  ")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.url().path(), "/categories");
    let html = response.text().await.unwrap();
    assert!(html.contains("Category added successfully"));
    assert!(html.contains("fly-fishing"));

    let categories: Vec<Value> = client
        .get(ctx.url("/api/categories"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let added = categories
        .iter()
        .find(|c| c["slug"] == "fly-fishing")
        .expect("category stored");
    assert_eq!(added["name"], "Fly Fishing");
    let id = added["id"].as_str().unwrap();

    let response = client
        .post(ctx.url(&format!("/categories/{id}/delete")))
        .send()
        .await
        .unwrap();
    let html = response.text().await.unwrap();
    assert!(html.contains("Category deleted successfully"));
    assert!(!html.contains("fly-fishing"));
}

#[tokio::test]
async fn test_duplicate_and_blank_categories_rejected() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let response = client
        .post(ctx.url("/api/categories"))
        .json(&json!({ "name": "Ice Fishing" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = client
        .post(ctx.url("/api/categories"))
        .json(&json!({ "name": "ice fishing" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = client
        .post(ctx.url("/api/categories"))
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let html = client
        .post(ctx.url("/categories"))
        .form(&[("name", "Ice Fishing")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("already exists"));
}

#[tokio::test]
async fn test_product_api_crud() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let response = client
        .post(ctx.url("/api/products"))
        .json(&json!({
            "name": "Penn Battle III",
            "price": "119.95",
            "sku": "PENN-BIII-3000",
            "category": "Reels",
            "stock": 4
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let product: Value = response.json().await.unwrap();
    let id = product["id"].as_str().unwrap().to_string();

    let response = client
        .patch(ctx.url(&format!("/api/products/{id}")))
        .json(&json!({ "stock": 40 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["stock"], 40);
    assert_eq!(updated["name"], "Penn Battle III");

    let response = client
        .delete(ctx.url(&format!("/api/products/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .delete(ctx.url(&format!("/api/products/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_api_rejects_blank_name() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let response = client
        .post(ctx.url("/api/products"))
        .json(&json!({ "name": " ", "price": "5.00", "sku": "BLANK-1", "category": "Lures" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_products_screen_lists_and_searches_remote_catalog() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let html = client
        .get(ctx.url("/products"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Ugly Stik GX2 Spinning Rod"));
    assert!(html.contains("Rapala Original Floater"));
    assert!(html.contains("$69.99"));
    assert!(html.contains("Low stock"));

    let html = client
        .get(ctx.url("/products?q=LURES"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Rapala Original Floater"));
    assert!(!html.contains("Ugly Stik GX2 Spinning Rod"));
}

#[tokio::test]
async fn test_delete_remote_product() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let html = client
        .post(ctx.url("/products/p-2/delete"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Product deleted successfully"));
    assert_eq!(ctx.storefront.deleted(), vec!["p-2".to_string()]);

    let html = client
        .post(ctx.url("/products/missing/delete"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Failed to delete product"));
}
