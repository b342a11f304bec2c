//! Admin route handlers: fulfillment and reporting.
//!
//! Every handler takes `RequireAdmin`; the role check lives in the
//! extractor, not here.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use casa_dulce_core::{OrderId, OrderStatus};

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::order::{OrderDetails, OrderStats};
use crate::services::fulfillment::FulfillmentService;
use crate::services::reporting::ReportingService;
use crate::state::AppState;

/// Query parameters for the order listing.
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    /// Restrict the listing to one status.
    pub status: Option<OrderStatus>,
}

/// Revenue response body.
#[derive(Debug, Serialize)]
pub struct RevenueResponse {
    /// Sum of `quantity * unit_price` over delivered orders.
    pub total: Decimal,
}

fn order_not_found(id: OrderId) -> impl FnOnce(RepositoryError) -> AppError {
    move |e| match e {
        RepositoryError::NotFound => AppError::NotFound(format!("order {id}")),
        other => AppError::Database(other),
    }
}

/// List orders with customer and product data, optionally filtered by
/// status.
#[instrument(skip_all, fields(status = ?query.status))]
pub async fn list_orders(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderDetails>>> {
    let orders = FulfillmentService::new(state.pool())
        .list(query.status)
        .await?;
    Ok(Json(orders))
}

/// Mark an order as delivered. Calling twice is a harmless no-op.
#[instrument(skip_all, fields(order_id = id))]
pub async fn mark_delivered(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let id = OrderId::new(id);
    FulfillmentService::new(state.pool())
        .mark_delivered(id)
        .await
        .map_err(order_not_found(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete an order regardless of status.
#[instrument(skip_all, fields(order_id = id))]
pub async fn delete_order(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let id = OrderId::new(id);
    FulfillmentService::new(state.pool())
        .delete(id)
        .await
        .map_err(order_not_found(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Order counts by status.
#[instrument(skip_all)]
pub async fn stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<OrderStats>> {
    let stats = ReportingService::new(state.pool()).stats().await?;
    Ok(Json(stats))
}

/// Revenue over delivered orders; 0 when there are none.
#[instrument(skip_all)]
pub async fn revenue(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Result<Json<RevenueResponse>> {
    let total = ReportingService::new(state.pool())
        .delivered_revenue()
        .await?;
    Ok(Json(RevenueResponse { total }))
}
