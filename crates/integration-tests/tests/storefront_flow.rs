//! Integration tests for the customer-facing flow: catalog, cart, and
//! checkout.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The storefront running (cargo run -p casa-dulce-storefront)
//!
//! Run with: cargo test -p casa-dulce-integration-tests -- --ignored --test-threads=1

use casa_dulce_integration_tests::{base_url, client, register_and_login};
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_health_endpoints() {
    let client = client();
    let base = base_url();

    let resp = client
        .get(format!("{base}/health"))
        .send()
        .await
        .expect("health request failed");
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(format!("{base}/health/ready"))
        .send()
        .await
        .expect("readiness request failed");
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_catalog_contains_seeded_products() {
    let client = client();
    let base = base_url();
    register_and_login(&client, "catalog").await;

    let resp = client
        .get(format!("{base}/api/products"))
        .send()
        .await
        .expect("products request failed");
    assert_eq!(resp.status(), 200);

    let products: Vec<Value> = resp.json().await.expect("products body");
    let names: Vec<&str> = products
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert!(names.contains(&"Torta Chocolinas"));
    assert!(names.contains(&"Cheesecake"));
    assert!(names.contains(&"Brownies"));
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_cart_requires_authentication() {
    let client = client();
    let base = base_url();

    let resp = client
        .get(format!("{base}/api/cart"))
        .send()
        .await
        .expect("cart request failed");
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_cart_merges_lines_for_same_product() {
    let client = client();
    let base = base_url();
    register_and_login(&client, "cart-merge").await;

    // Fresh session: the cart starts empty
    let resp = client
        .get(format!("{base}/api/cart"))
        .send()
        .await
        .expect("cart view failed");
    let lines: Vec<Value> = resp.json().await.expect("cart body");
    assert!(lines.is_empty());

    // add(1, 2) then add(1, 3) merges into one line with quantity 5
    for quantity in [2, 3] {
        let resp = client
            .post(format!("{base}/cart/add"))
            .json(&json!({"product_id": 1, "quantity": quantity}))
            .send()
            .await
            .expect("cart add failed");
        assert_eq!(resp.status(), 200);
    }

    let resp = client
        .get(format!("{base}/api/cart"))
        .send()
        .await
        .expect("cart view failed");
    let lines: Vec<Value> = resp.json().await.expect("cart body");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["product_id"], 1);
    assert_eq!(lines[0]["quantity"], 5);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_cart_remove_is_idempotent() {
    let client = client();
    let base = base_url();
    register_and_login(&client, "cart-remove").await;

    let resp = client
        .post(format!("{base}/cart/add"))
        .json(&json!({"product_id": 2, "quantity": 1}))
        .send()
        .await
        .expect("cart add failed");
    assert_eq!(resp.status(), 200);

    for _ in 0..2 {
        let resp = client
            .post(format!("{base}/cart/remove"))
            .json(&json!({"product_id": 2}))
            .send()
            .await
            .expect("cart remove failed");
        assert_eq!(resp.status(), 200);
    }

    let resp = client
        .get(format!("{base}/api/cart"))
        .send()
        .await
        .expect("cart view failed");
    let lines: Vec<Value> = resp.json().await.expect("cart body");
    assert!(!lines.iter().any(|l| l["product_id"] == 2));
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_cart_add_rejects_bad_quantity() {
    let client = client();
    let base = base_url();
    register_and_login(&client, "cart-invalid").await;

    for quantity in [json!(0), json!(-1)] {
        let resp = client
            .post(format!("{base}/cart/add"))
            .json(&json!({"product_id": 1, "quantity": quantity}))
            .send()
            .await
            .expect("cart add failed");
        assert_eq!(resp.status(), 400, "quantity {quantity} should be rejected");
    }

    // Fractional and non-numeric quantities die in deserialization
    for quantity in [json!(1.5), json!("two")] {
        let resp = client
            .post(format!("{base}/cart/add"))
            .json(&json!({"product_id": 1, "quantity": quantity}))
            .send()
            .await
            .expect("cart add failed");
        assert!(
            resp.status().is_client_error(),
            "quantity {quantity} should be rejected"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_checkout_on_empty_cart_writes_nothing() {
    let client = client();
    let base = base_url();
    register_and_login(&client, "checkout-empty").await;

    let resp = client
        .post(format!("{base}/cart/checkout"))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("checkout body");
    assert_eq!(body["outcome"], "cart_empty");
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_checkout_converts_cart_lines_to_orders() {
    let client = client();
    let base = base_url();
    register_and_login(&client, "checkout").await;

    // Two distinct products -> two orders
    for (product_id, quantity) in [(1, 2), (3, 1)] {
        let resp = client
            .post(format!("{base}/cart/add"))
            .json(&json!({"product_id": product_id, "quantity": quantity}))
            .send()
            .await
            .expect("cart add failed");
        assert_eq!(resp.status(), 200);
    }

    let resp = client
        .post(format!("{base}/cart/checkout"))
        .send()
        .await
        .expect("checkout failed");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("checkout body");
    assert_eq!(body["outcome"], "placed");
    assert_eq!(body["order_count"], 2);
    assert!(body["delivery_date"].is_string());

    // The cart is drained by a successful checkout
    let resp = client
        .get(format!("{base}/api/cart"))
        .send()
        .await
        .expect("cart view failed");
    let lines: Vec<Value> = resp.json().await.expect("cart body");
    assert!(lines.is_empty());
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_place_single_order() {
    let client = client();
    let base = base_url();
    register_and_login(&client, "single-order").await;

    let resp = client
        .post(format!("{base}/orders"))
        .json(&json!({"product_id": 2, "quantity": 1, "delivery_date": "2026-12-24"}))
        .send()
        .await
        .expect("place order failed");
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.expect("order body");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["delivery_date"], "2026-12-24");
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_place_single_order_unknown_product() {
    let client = client();
    let base = base_url();
    register_and_login(&client, "single-order-404").await;

    let resp = client
        .post(format!("{base}/orders"))
        .json(&json!({"product_id": 999_999, "quantity": 1, "delivery_date": "2026-12-24"}))
        .send()
        .await
        .expect("place order failed");
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
#[ignore = "Requires running storefront and database"]
async fn test_payment_stub_approves() {
    let client = client();
    let base = base_url();
    register_and_login(&client, "payment").await;

    let resp = client
        .post(format!("{base}/checkout/payment"))
        .json(&json!({
            "name_on_card": "Test Customer",
            "card_number": "4111111111111111",
            "expiry": "12/30",
            "cvv": "123"
        }))
        .send()
        .await
        .expect("payment failed");
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.expect("payment body");
    assert_eq!(body["status"], "approved");

    // A blank field is rejected
    let resp = client
        .post(format!("{base}/checkout/payment"))
        .json(&json!({
            "name_on_card": "Test Customer",
            "card_number": "",
            "expiry": "12/30",
            "cvv": "123"
        }))
        .send()
        .await
        .expect("payment failed");
    assert_eq!(resp.status(), 400);
}
