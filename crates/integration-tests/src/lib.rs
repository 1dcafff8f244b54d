//! Integration tests for the ReelDeal admin.
//!
//! Each test spawns two in-process servers on ephemeral ports:
//!
//! - a fake storefront API ([`FakeStorefront`]) serving canned customers,
//!   orders and products and recording every write it receives
//! - the real admin router over an in-memory record store, pointed at the
//!   fake storefront
//!
//! Tests then drive the admin over HTTP with a cookie-carrying `reqwest`
//! client, exactly as a browser would.
//!
//! ```bash
//! cargo test -p reeldeal-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use reeldeal_admin::{
    config::{AdminConfig, AdminCredentialsConfig},
    db::RecordStore,
    state::AppState,
};
use secrecy::SecretString;
use serde_json::{Value, json};

/// Username seeded into every test admin.
pub const ADMIN_USERNAME: &str = "admin";

/// Password seeded into every test admin.
pub const ADMIN_PASSWORD: &str = "tight-lines-2024";

/// Order the fake storefront refuses to confirm.
pub const LOCKED_ORDER_ID: &str = "ord-locked";

/// Writes received by the fake storefront.
#[derive(Debug, Clone, Default)]
pub struct FakeStorefront {
    forwarded: Arc<Mutex<Vec<(String, Value)>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    orders_down: Arc<AtomicBool>,
}

impl FakeStorefront {
    /// Payment link requests received, as `(order_id, body)`.
    #[must_use]
    pub fn forwarded(&self) -> Vec<(String, Value)> {
        self.forwarded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Product IDs deleted.
    #[must_use]
    pub fn deleted(&self) -> Vec<String> {
        self.deleted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make `GET /api/orders` fail with a 500.
    pub fn take_orders_down(&self) {
        self.orders_down.store(true, Ordering::SeqCst);
    }

    fn router(self) -> Router {
        Router::new()
            .route("/me/users", get(users))
            .route("/api/orders", get(orders))
            .route("/api/confirm/forward-payment/{id}", post(forward_payment))
            .route("/add", get(products))
            .route("/add/{id}", delete(delete_product))
            .with_state(self)
    }
}

async fn users() -> Json<Value> {
    Json(json!([
        {
            "_id": "u-1",
            "name": "Ana Reyes",
            "email": "ana@example.com",
            "createdAt": "2026-01-15T09:30:00Z",
            "role": "user"
        },
        {
            "_id": "u-2",
            "name": "Bo Lindqvist",
            "email": "bo@example.com",
            "createdAt": "2026-03-02T14:00:00Z"
        }
    ]))
}

async fn orders(State(fake): State<FakeStorefront>) -> Response {
    if fake.orders_down.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database unavailable" })),
        )
            .into_response();
    }

    Json(json!([
        {
            "_id": "ord-1",
            "user": { "_id": "u-1", "name": "Ana Reyes", "email": "ana@example.com" },
            "cartItems": [
                { "name": "Shimano Stradic Reel", "quantity": 1, "price": 189.99 },
                { "name": "Braided Line 20lb", "quantity": 2, "price": 24.5 }
            ],
            "totalPrice": 238.99,
            "paymentmethod": "bank-transfer",
            "status": "pending",
            "createdAt": "2026-10-01T10:00:00Z"
        },
        {
            "_id": LOCKED_ORDER_ID,
            "user": { "_id": "u-2", "name": "Bo Lindqvist", "email": "bo@example.com" },
            "cartItems": [
                { "name": "Tackle Box", "quantity": 1, "price": 45 }
            ],
            "totalPrice": 45,
            "status": "confirmed",
            "createdAt": "2026-09-12T16:20:00Z"
        }
    ]))
    .into_response()
}

async fn forward_payment(
    State(fake): State<FakeStorefront>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if id == LOCKED_ORDER_ID {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Order already confirmed" })),
        )
            .into_response();
    }

    fake.forwarded
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push((id, body));
    Json(json!({ "success": true })).into_response()
}

async fn products() -> Json<Value> {
    Json(json!({
        "fishingTools": [
            {
                "_id": "p-1",
                "ProductName": "Ugly Stik GX2 Spinning Rod",
                "SKU": "UGS-GX2-70",
                "Description": "Durable all-round rod",
                "Specifications": "7ft, medium",
                "Price": 69.99,
                "CompareatPrice": 79.99,
                "Weight": 0.4,
                "Category": "Rods",
                "StockQuantity": 25,
                "img3": "https://cdn.example.com/gx2.jpg"
            },
            {
                "_id": "p-2",
                "ProductName": "Rapala Original Floater",
                "SKU": "RAP-F11",
                "Price": 9.49,
                "Weight": "0.01",
                "Category": "Lures",
                "StockQuantity": 3
            }
        ]
    }))
}

async fn delete_product(State(fake): State<FakeStorefront>, Path(id): Path<String>) -> Response {
    if !id.starts_with("p-") {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" }))).into_response();
    }

    fake.deleted
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(id);
    Json(json!({ "success": true })).into_response()
}

/// Running admin plus fake storefront.
pub struct TestContext {
    /// Admin base URL, without trailing slash.
    pub admin_url: String,
    /// Writes seen by the storefront.
    pub storefront: FakeStorefront,
    /// Admin record store.
    pub store: RecordStore,
}

impl TestContext {
    /// Spawn both servers over an empty in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if a listener cannot be bound or the admin state cannot be built.
    pub async fn spawn() -> Self {
        Self::spawn_with_store(RecordStore::memory()).await
    }

    /// Spawn both servers over a prepared store, e.g. a file store holding
    /// collections written beforehand.
    ///
    /// # Panics
    ///
    /// Panics if a listener cannot be bound or the admin state cannot be built.
    pub async fn spawn_with_store(store: RecordStore) -> Self {
        let storefront = FakeStorefront::default();
        let api_addr = serve(storefront.clone().router()).await;

        let config = AdminConfig::new(
            url::Url::parse(&format!("http://{api_addr}")).expect("fake storefront URL"),
            std::env::temp_dir(),
            AdminCredentialsConfig {
                username: ADMIN_USERNAME.to_string(),
                password: SecretString::from(ADMIN_PASSWORD),
            },
        );
        let state = AppState::with_store(config, store.clone())
            .await
            .expect("admin state");
        let admin_addr = serve(reeldeal_admin::app(state)).await;

        Self {
            admin_url: format!("http://{admin_addr}"),
            storefront,
            store,
        }
    }

    /// Absolute admin URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// Client with a cookie jar that follows redirects.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("http client")
    }

    /// Client with a cookie jar that reports redirects instead of following them.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn no_redirect_client() -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("http client")
    }

    /// Log `client` in through the login form.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn login(&self, client: &reqwest::Client) -> reqwest::Response {
        client
            .post(self.url("/auth/login"))
            .form(&[("username", ADMIN_USERNAME), ("password", ADMIN_PASSWORD)])
            .send()
            .await
            .expect("login request")
    }

    /// A client that is already logged in and follows redirects.
    ///
    /// # Panics
    ///
    /// Panics if login does not land on the dashboard.
    pub async fn logged_in_client(&self) -> reqwest::Client {
        let client = Self::client();
        let response = self.login(&client).await;
        assert!(response.status().is_success(), "login failed");
        client
    }
}

/// Serve `router` on an ephemeral local port.
async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    addr
}
