//! Integration tests for Stark.
//!
//! Each test starts its own mock catalog source and storefront on ephemeral
//! ports, so tests run in parallel without shared state.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stark-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_catalog` - Listing, filters and product detail
//! - `storefront_cart` - Cart, checkout and orders
//! - `storefront_auth` - Sign-in, reviews, account and degraded configuration

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use reqwest::Client;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use stark_storefront::config::StorefrontConfig;
use stark_storefront::state::AppState;

/// Publishable key the test storefront is configured with.
pub const TEST_IDENTITY_KEY: &str = "pk_test_c3RhcmstaW50ZWdyYXRpb24";

/// The mock catalog's products, in source order.
#[must_use]
pub fn catalog_fixtures() -> Vec<Value> {
    vec![
        product(1, "Fjallraven Backpack", "109.95", "Fits 15 inch laptops in the padded sleeve", "men's clothing", 3.9, 120),
        product(2, "Slim Fit T-Shirt", "22.3", "Lightweight casual cotton tee", "men's clothing", 4.1, 259),
        product(5, "Dragon Station Chain Bracelet", "695", "Legends collection silver bracelet", "jewelery", 4.6, 400),
        product(9, "WD 2TB External Hard Drive", "64", "USB 3.0 portable storage", "electronics", 3.3, 203),
        product(10, "SanDisk SSD PLUS 1TB", "109", "Internal SATA III solid state drive", "electronics", 2.9, 470),
        product(14, "Samsung 49-Inch Gaming Monitor", "999.99", "Curved QLED display", "electronics", 2.2, 140),
        product(15, "Snowboard Jacket", "56.99", "Winter coat with detachable liner", "women's clothing", 2.6, 235),
    ]
}

fn product(
    id: i32,
    title: &str,
    price: &str,
    description: &str,
    category: &str,
    rate: f64,
    count: u32,
) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": serde_json::Number::from_str(price).expect("fixture price"),
        "description": description,
        "category": category,
        "image": format!("https://img.test/{id}.jpg"),
        "rating": {"rate": rate, "count": count},
    })
}

async fn list_products(Query(params): Query<HashMap<String, String>>) -> Json<Vec<Value>> {
    let limit = params
        .get("limit")
        .and_then(|limit| limit.parse::<usize>().ok())
        .unwrap_or(usize::MAX);
    Json(catalog_fixtures().into_iter().take(limit).collect())
}

async fn list_category(Path(category): Path<String>) -> Json<Vec<Value>> {
    Json(
        catalog_fixtures()
            .into_iter()
            .filter(|p| p["category"] == category.as_str())
            .collect(),
    )
}

async fn get_product(Path(id): Path<String>) -> Response {
    catalog_fixtures()
        .into_iter()
        .find(|p| p["id"].to_string() == id)
        // The source answers unknown ids with an empty 200.
        .map_or_else(|| StatusCode::OK.into_response(), |p| Json(p).into_response())
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });
    addr
}

/// Start a mock catalog source and return its base URL.
pub async fn spawn_catalog() -> String {
    let app = Router::new()
        .route("/products", get(list_products))
        .route("/products/category/{category}", get(list_category))
        .route("/products/{id}", get(get_product));
    format!("http://{}", serve(app).await)
}

/// Start a catalog source that fails every request.
pub async fn spawn_failing_catalog() -> String {
    let app = Router::new().fallback(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") });
    format!("http://{}", serve(app).await)
}

/// Start a storefront backed by the catalog at `catalog_url`.
pub async fn spawn_storefront(catalog_url: &str) -> String {
    let vars = HashMap::from([
        ("CLERK_PUBLISHABLE_KEY", TEST_IDENTITY_KEY.to_string()),
        ("STRIPE_PUBLISHABLE_KEY", "pk_test_stripe_51HgTest".to_string()),
        ("CATALOG_API_URL", catalog_url.to_string()),
    ]);
    let config = StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
        .expect("Failed to build test configuration");

    format!(
        "http://{}",
        serve(stark_storefront::app(AppState::new(config))).await
    )
}

/// Start a storefront that is missing its identity provider key.
pub async fn spawn_unconfigured_storefront() -> String {
    let err = StorefrontConfig::from_lookup(|_| None)
        .expect_err("configuration without identity key must fail");
    let key = err.missing_key().expect("identity key must be reported missing");

    format!(
        "http://{}",
        serve(stark_storefront::configuration_missing_app(key)).await
    )
}

/// A client that keeps the session cookie between requests.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Read a decimal that was serialized as a string or a number.
#[must_use]
pub fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        Value::Number(n) => Decimal::from_str(&n.to_string()).expect("decimal number"),
        other => panic!("expected a decimal, got {other}"),
    }
}

/// Product ids of a listing response, in order.
#[must_use]
pub fn product_ids(listing: &Value) -> Vec<i64> {
    listing["products"]
        .as_array()
        .expect("products array")
        .iter()
        .map(|p| p["id"].as_i64().expect("product id"))
        .collect()
}
