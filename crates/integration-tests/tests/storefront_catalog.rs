//! Listing, filter and product detail tests.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde_json::Value;
use stark_integration_tests::{
    client, decimal, product_ids, spawn_catalog, spawn_failing_catalog, spawn_storefront,
};

async fn listing(base: &str, query: &str) -> (StatusCode, Value) {
    let resp = client()
        .get(format!("{base}/products{query}"))
        .send()
        .await
        .unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_default_listing_keeps_source_order() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    let (status, body) = listing(&base, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_ids(&body), vec![1, 2, 5, 9, 10, 14, 15]);
    assert_eq!(body["count"], 7);
    assert_eq!(body["filters"]["category"], "all");
    assert_eq!(body["categories"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_category_with_price_low_sort() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    let (status, body) = listing(&base, "?category=electronics&sort=price-low").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_ids(&body), vec![9, 10, 14]);

    let prices: Vec<Decimal> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| decimal(&p["price"]))
        .collect();
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(body["products"][0]["display_price"], "$64.00");
}

#[tokio::test]
async fn test_category_label_with_apostrophe() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    let (status, body) = listing(&base, "?category=men%27s%20clothing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product_ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn test_search_matches_title_and_description() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    let (_, body) = listing(&base, "?q=DRIVE").await;
    assert_eq!(product_ids(&body), vec![9, 10]);

    let (_, body) = listing(&base, "?q=jacket").await;
    assert_eq!(product_ids(&body), vec![15]);

    let (_, body) = listing(&base, "?q=nothing-like-this").await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_price_range_and_rating_combine() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    let (_, body) = listing(&base, "?min_price=50&max_price=110").await;
    assert_eq!(product_ids(&body), vec![1, 9, 10, 15]);

    let (_, body) = listing(&base, "?min_price=50&max_price=110&min_rating=3").await;
    assert_eq!(product_ids(&body), vec![1, 9]);

    let (_, body) = listing(&base, "?min_rating=4&sort=rating").await;
    assert_eq!(product_ids(&body), vec![5, 2]);
}

#[tokio::test]
async fn test_missing_bound_uses_default() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    // Only the upper bound is given; the lower stays at 0.
    let (_, body) = listing(&base, "?max_price=60").await;
    assert_eq!(product_ids(&body), vec![2, 15]);

    // Default upper bound of 1000 excludes nothing in this catalog.
    let (_, body) = listing(&base, "?min_price=600").await;
    assert_eq!(product_ids(&body), vec![5, 14]);
}

#[tokio::test]
async fn test_empty_parameters_are_ignored() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    let (status, body) =
        listing(&base, "?category=&q=&min_price=&max_price=&min_rating=&sort=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 7);
}

#[tokio::test]
async fn test_invalid_filters_are_rejected() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    let (status, body) = listing(&base, "?min_price=200&max_price=100").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("above maximum"));

    let (status, _) = listing(&base, "?min_rating=6").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = listing(&base, "?sort=alphabetical").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("alphabetical"));

    let (status, body) = listing(&base, "?category=garden").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("unknown category"));
}

#[tokio::test]
async fn test_search_keeps_spaces_in_query() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    // " hard" only occurs inside "WD 2TB External Hard Drive".
    let (_, body) = listing(&base, "?q=%20hard").await;
    assert_eq!(product_ids(&body), vec![9]);
    assert_eq!(body["filters"]["query"], " hard");

    // "Dragon Station Chain Bracelet" has a "d" but never a "d ".
    let (_, body) = listing(&base, "?q=d%20").await;
    assert_eq!(product_ids(&body), vec![1, 9, 10, 14, 15]);
}

#[tokio::test]
async fn test_source_failure_is_bad_gateway() {
    let base = spawn_storefront(&spawn_failing_catalog().await).await;

    let (status, body) = listing(&base, "").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Catalog unavailable");
}

#[tokio::test]
async fn test_product_detail() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    let resp = client()
        .get(format!("{base}/products/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 5);
    assert_eq!(body["category"], "jewelery");
    assert_eq!(decimal(&body["price"]), Decimal::new(695, 0));
    assert_eq!(body["display_price"], "$695.00");
    assert_eq!(body["rating"]["count"], 400);
    assert!(body["reviews"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let base = spawn_storefront(&spawn_catalog().await).await;

    let resp = client()
        .get(format!("{base}/products/404"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
