//! Staff-side order fulfillment.
//!
//! The order state machine is `pending -> delivered`, with no way back.
//! Callers reach this service only through the admin extractor; the role
//! check has already happened.

use sqlx::PgPool;

use casa_dulce_core::{OrderId, OrderStatus};

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::models::order::OrderDetails;

/// Service for order lifecycle transitions and deletion.
pub struct FulfillmentService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> FulfillmentService<'a> {
    /// Create a new fulfillment service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Mark an order as delivered.
    ///
    /// Idempotent: marking an already delivered order succeeds and changes
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn mark_delivered(&self, id: OrderId) -> Result<(), RepositoryError> {
        self.orders.mark_delivered(id).await?;
        tracing::info!(order_id = %id, "order marked delivered");
        Ok(())
    }

    /// Delete an order regardless of status.
    ///
    /// Deleting a delivered order is allowed but logged at WARN: the ledger
    /// keeps no tombstone, so the log is the only audit trail.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let status = self.orders.delete(id).await?;
        if status == OrderStatus::Delivered {
            tracing::warn!(order_id = %id, "deleted an already delivered order");
        } else {
            tracing::info!(order_id = %id, "order deleted");
        }
        Ok(())
    }

    /// List orders with customer and product display data, optionally
    /// filtered to one status, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(
        &self,
        filter: Option<OrderStatus>,
    ) -> Result<Vec<OrderDetails>, RepositoryError> {
        self.orders.list_with_details(filter).await
    }
}
