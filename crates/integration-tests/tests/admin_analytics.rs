//! Analytics screen, CSV export and the reporting API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::{Duration, SecondsFormat, Utc};
use reeldeal_admin::db::{RecordStore, StorageBackend};
use reeldeal_core::{DateRange, Order, SalesSummary};
use reeldeal_integration_tests::TestContext;
use reqwest::{StatusCode, header};
use serde_json::{Value, json};

/// One stored order as the record store keeps it on disk.
fn stored_order(id: &str, created_at: &str, items: &[(&str, u32, &str)], total: &str) -> Value {
    json!({
        "id": id,
        "customerId": "1",
        "customerName": "John Angler",
        "customerEmail": "john.angler@example.com",
        "shippingAddress": {
            "street": "123 Harbor Lane",
            "city": "Coastal Bay",
            "state": "CA",
            "zip": "90210"
        },
        "items": items
            .iter()
            .map(|(name, quantity, price)| json!({
                "productId": name.to_lowercase().replace(' ', "-"),
                "productName": name,
                "quantity": quantity,
                "price": price
            }))
            .collect::<Vec<_>>(),
        "total": total,
        "status": "processing",
        "createdAt": created_at
    })
}

/// Admin over a file store holding two orders from the last hour and one
/// from 2023.
async fn spawn_with_recent_orders(dir: &std::path::Path) -> TestContext {
    let recent = (Utc::now() - Duration::hours(1)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let orders = json!([
        stored_order(
            "RD-3001",
            &recent,
            &[("OceanMaster Pro Rod", 1, "199.99"), ("Bass Assassin Lure", 2, "12.99")],
            "225.97",
        ),
        stored_order(
            "RD-3002",
            &recent,
            &[("Bass Assassin Lure", 3, "12.99"), ("Braided Line 20lb", 1, "34.50")],
            "73.47",
        ),
        stored_order(
            "RD-0999",
            "2023-06-01T10:00:00Z",
            &[("Penn Battle III Reel", 1, "500.00")],
            "500.00",
        ),
    ]);
    std::fs::write(dir.join("reeldeal_orders.json"), orders.to_string()).unwrap();

    TestContext::spawn_with_store(RecordStore::new(StorageBackend::file(dir))).await
}

#[tokio::test]
async fn test_analytics_screen_marks_selected_range() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let html = client
        .get(ctx.url("/analytics?range=this-quarter"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Total Revenue"));
    assert!(html.contains(r#"<option value="this-quarter" selected>"#));
    assert!(html.contains("/analytics/export?range=this-quarter"));
}

#[tokio::test]
async fn test_csv_export_downloads_every_order() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;
    let orders: Vec<Order> = ctx.store.list().await.unwrap();

    let response = client
        .get(ctx.url("/analytics/export?range=this-week"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert!(
        headers
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let disposition = headers
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.contains("reeldeal-sales-this-week-"));
    assert!(disposition.ends_with(".csv\""));

    let body = response.text().await.unwrap();
    let mut lines = body.lines();
    assert_eq!(lines.next(), Some("Order ID,Customer,Date,Total,Status"));
    assert_eq!(lines.count(), orders.len());
    assert!(body.contains("RD-1001,John Angler,10/27/2023,225.97,processing"));

    // The toast shows on the next page
    let html = client
        .get(ctx.url("/analytics"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Sales data exported successfully"));
}

#[tokio::test]
async fn test_analytics_api_matches_store() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let summary: Value = client
        .get(ctx.url("/api/analytics?range=this-quarter"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let orders: Vec<Order> = ctx.store.list().await.unwrap();
    let expected = SalesSummary::compute(&orders, DateRange::ThisQuarter, Utc::now());
    assert_eq!(summary["range"], "this-quarter");
    assert_eq!(summary["totalOrders"], expected.total_orders);
    assert!(summary["topProducts"].as_array().unwrap().len() <= 5);
    assert!(summary.get("total_orders").is_none());
}

#[tokio::test]
async fn test_dashboard_api() {
    let ctx = TestContext::spawn().await;
    let client = ctx.logged_in_client().await;

    let response = client.get(ctx.url("/api/dashboard")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats: Value = response.json().await.unwrap();

    let customers = ctx.store.list_customers().await.unwrap();
    assert_eq!(stats["customerCount"], customers.len());
    let recent = stats["recentOrders"].as_array().unwrap();
    assert!(recent.len() <= 5);
    // Nested orders use the same casing as the summary around them
    assert!(recent.iter().all(|o| o.get("customerName").is_some()));
    assert!(stats["todaySales"].as_str().unwrap().contains('.'));
}

#[tokio::test]
async fn test_analytics_api_aggregates_recent_orders() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = spawn_with_recent_orders(dir.path()).await;
    let client = ctx.logged_in_client().await;

    let summary: Value = client
        .get(ctx.url("/api/analytics?range=this-week"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(summary["range"], "this-week");
    assert_eq!(summary["totalOrders"], 2);
    assert_eq!(summary["totalRevenue"], "299.44");
    assert_eq!(summary["averageOrderValue"], "149.72");

    let top = summary["topProducts"].as_array().unwrap();
    let names: Vec<&str> = top.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        ["OceanMaster Pro Rod", "Bass Assassin Lure", "Braided Line 20lb"]
    );
    assert_eq!(top[1]["quantity"], 5);
    assert_eq!(top[1]["revenue"], "64.95");
    assert_eq!(top[2]["revenue"], "34.50");
}

#[tokio::test]
async fn test_analytics_screen_shows_recent_totals() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = spawn_with_recent_orders(dir.path()).await;
    let client = ctx.logged_in_client().await;

    let html = client
        .get(ctx.url("/analytics?range=this-week"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains("$299.44"));
    assert!(html.contains("$149.72"));
    assert!(html.contains("5 units sold"));
    assert!(html.contains("$64.95"));
    assert!(!html.contains("Penn Battle III Reel"));

    let rod = html.find("OceanMaster Pro Rod").unwrap();
    let lure = html.find("Bass Assassin Lure").unwrap();
    let line = html.find("Braided Line 20lb").unwrap();
    assert!(rod < lure && lure < line);
}

#[tokio::test]
async fn test_old_orders_only_count_in_export() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = spawn_with_recent_orders(dir.path()).await;
    let client = ctx.logged_in_client().await;

    let body = client
        .get(ctx.url("/analytics/export?range=today"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert_eq!(body.lines().count(), 4);
    assert!(body.contains("RD-0999,John Angler,6/1/2023,500.00,processing"));
}
