//! Integration tests for Casa Dulce.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and the storefront
//! docker compose up -d postgres
//! cargo run -p casa-dulce-storefront &
//!
//! # Run integration tests (ignored by default)
//! cargo test -p casa-dulce-integration-tests -- --ignored --test-threads=1
//! ```
//!
//! The admin tests additionally need an admin account, created via:
//!
//! ```bash
//! cargo run -p casa-dulce-cli -- admin create \
//!     -e admin@casadulce.test -n Admin -p <password>
//! export ADMIN_EMAIL=admin@casadulce.test ADMIN_PASSWORD=<password>
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store, so the session survives
/// across requests.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email address per test run, so registrations never collide.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{prefix}+{nanos}@casadulce.test")
}

/// Register a fresh customer and log in with the given client.
///
/// Returns the registered email.
///
/// # Panics
///
/// Panics if registration or login does not succeed.
pub async fn register_and_login(client: &Client, prefix: &str) -> String {
    let base = base_url();
    let email = unique_email(prefix);
    let password = "integration-test-pass";

    let resp = client
        .post(format!("{base}/auth/register"))
        .json(&json!({"name": "Test Customer", "email": email, "password": password}))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(resp.status(), 201, "registration should succeed");

    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), 200, "login should succeed");

    email
}

/// Log in as the admin configured via `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
///
/// # Panics
///
/// Panics if the variables are unset or the login fails.
pub async fn login_as_admin(client: &Client) {
    let base = base_url();
    let email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL not set");
    let password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD not set");

    let resp = client
        .post(format!("{base}/auth/login"))
        .json(&json!({"email": email, "password": password}))
        .send()
        .await
        .expect("admin login request failed");
    assert_eq!(resp.status(), 200, "admin login should succeed");

    let body: Value = resp.json().await.expect("admin login body");
    assert_eq!(body["role"], "admin", "account must have the admin role");
}
