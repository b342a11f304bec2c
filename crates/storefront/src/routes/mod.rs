//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the database)
//!
//! # Auth
//! POST /auth/register          - Register a customer account
//! POST /auth/login             - Login, stores identity in the session
//! POST /auth/logout            - Destroy the session
//!
//! # Read API (requires auth)
//! GET  /api/products           - Catalog listing
//! GET  /api/profile            - Current user's profile
//! GET  /api/cart               - View the session cart (possibly empty)
//!
//! # Cart (requires auth)
//! POST /cart/add               - Add a product (merges into existing line)
//! POST /cart/remove            - Remove every line for a product
//! POST /cart/checkout          - Convert the cart into orders, atomically
//!
//! # Orders
//! POST /orders                 - Place a single order with an explicit date
//! POST /checkout/payment       - Always-approve payment stub
//!
//! # Admin (requires admin role)
//! GET    /admin/orders             - Joined listing, ?status= filter
//! POST   /admin/orders/{id}/delivered - Mark delivered (idempotent)
//! DELETE /admin/orders/{id}        - Delete an order
//! GET    /admin/stats              - {total, pending, delivered}
//! GET    /admin/revenue            - Delivered revenue (0 if none)
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod payment;
pub mod products;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Parse a client-supplied quantity into a positive integer.
///
/// Rejects zero, negative, and values past the ledger's integer column;
/// non-numeric and fractional input is already rejected during
/// deserialization.
pub(crate) fn parse_quantity(raw: i64) -> Result<u32, AppError> {
    if !(1..=i64::from(i32::MAX)).contains(&raw) {
        return Err(AppError::BadRequest(
            "quantity must be a positive integer".to_string(),
        ));
    }
    u32::try_from(raw)
        .map_err(|_| AppError::BadRequest("quantity must be a positive integer".to_string()))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the authenticated read API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/profile", get(account::profile))
        .route("/cart", get(cart::show))
}

/// Create the cart mutation router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create the admin router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin::list_orders))
        .route("/orders/{id}/delivered", post(admin::mark_delivered))
        .route("/orders/{id}", delete(admin::delete_order))
        .route("/stats", get(admin::stats))
        .route("/revenue", get(admin::revenue))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/api", api_routes())
        .nest("/cart", cart_routes())
        .route("/orders", post(orders::place))
        .route("/checkout/payment", post(payment::pay))
        .nest("/admin", admin_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_accepts_positive() {
        assert_eq!(parse_quantity(1).expect("valid"), 1);
        assert_eq!(parse_quantity(500).expect("valid"), 500);
    }

    #[test]
    fn test_parse_quantity_rejects_non_positive() {
        assert!(parse_quantity(0).is_err());
        assert!(parse_quantity(-3).is_err());
    }

    #[test]
    fn test_parse_quantity_rejects_out_of_range() {
        assert!(parse_quantity(i64::from(i32::MAX) + 1).is_err());
    }
}
