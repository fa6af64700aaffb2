//! Integration tests for product catalog CRUD.
//!
//! These tests require a running server (cargo run -p kumquat-server)
//! with a reachable `PostgreSQL` database.

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Base URL for the shop API (configurable via environment).
fn base_url() -> String {
    std::env::var("SHOP_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Test helper: Create a product and return its JSON record.
async fn create_product(client: &Client, name: &str, price: &str) -> Value {
    let resp = client
        .post(format!("{}/products", base_url()))
        .json(&json!({
            "name": name,
            "price": price,
            "description": "integration test product",
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse product")
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_create_then_fetch_product() {
    let client = Client::new();
    let created = create_product(&client, "rooibos tea", "4.50").await;
    let id = created["id"].as_i64().expect("product id");

    let resp = client
        .get(format!("{}/products/{id}", base_url()))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::OK);

    let fetched: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["name"], created["name"]);
    assert_eq!(fetched["price"], created["price"]);
    assert_eq!(fetched["description"], created["description"]);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_list_products_contains_created() {
    let client = Client::new();
    let created = create_product(&client, "assam tea", "3.25").await;

    let resp = client
        .get(format!("{}/products", base_url()))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse list");
    assert!(products.iter().any(|p| p["id"] == created["id"]));
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_get_missing_product_returns_404() {
    let client = Client::new();

    let resp = client
        .get(format!("{}/products/999999999", base_url()))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_create_rejects_negative_price() {
    let client = Client::new();

    let resp = client
        .post(format!("{}/products", base_url()))
        .json(&json!({
            "name": "bad tea",
            "price": "-1.00",
            "description": "should not exist",
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(resp.status().is_client_error());
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_partial_update_merges_fields() {
    let client = Client::new();
    let created = create_product(&client, "oolong tea", "6.00").await;
    let id = created["id"].as_i64().expect("product id");

    let resp = client
        .patch(format!("{}/products/{id}", base_url()))
        .json(&json!({ "price": "7.50" }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);

    let updated: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(updated["price"], "7.50");
    // Untouched fields keep their values
    assert_eq!(updated["name"], created["name"]);
    assert_eq!(updated["description"], created["description"]);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn test_delete_product_then_fetch_404() {
    let client = Client::new();
    let created = create_product(&client, "ephemeral tea", "1.00").await;
    let id = created["id"].as_i64().expect("product id");

    let resp = client
        .delete(format!("{}/products/{id}", base_url()))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/products/{id}", base_url()))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
