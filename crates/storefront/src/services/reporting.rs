//! Read-only operational reporting over the order ledger.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::models::order::OrderStats;

/// Service for aggregate queries: counts by status and delivered revenue.
pub struct ReportingService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> ReportingService<'a> {
    /// Create a new reporting service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Order counts by status; `pending + delivered == total`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self) -> Result<OrderStats, RepositoryError> {
        self.orders.stats().await
    }

    /// Revenue over delivered orders, 0 when there are none.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delivered_revenue(&self) -> Result<Decimal, RepositoryError> {
        self.orders.delivered_revenue().await
    }
}
