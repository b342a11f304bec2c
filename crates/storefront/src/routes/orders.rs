//! Single-order route handler.
//!
//! Besides checkout, an order can be placed directly for one product with
//! an explicit delivery date.

use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;

use casa_dulce_core::ProductId;

use crate::db::{OrderRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::state::AppState;

/// Place-order request body.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    pub delivery_date: NaiveDate,
}

/// Place a single order.
///
/// The ledger write enforces the product reference; an unknown product is
/// a 404, not a constraint error.
#[instrument(skip_all, fields(product_id = %request.product_id))]
pub async fn place(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let quantity = super::parse_quantity(request.quantity)?;

    let order = OrderRepository::new(state.pool())
        .create(user.id, request.product_id, quantity, request.delivery_date)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => {
                AppError::NotFound(format!("product {}", request.product_id))
            }
            other => AppError::Database(other),
        })?;

    tracing::info!(order_id = %order.id, "order placed");

    Ok((StatusCode::CREATED, Json(order)))
}
