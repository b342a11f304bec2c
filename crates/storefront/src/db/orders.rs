//! Order ledger repository.
//!
//! The ledger is the single source of truth for order state. Checkout's
//! multi-row insert is the only multi-statement write in the system and
//! runs inside one transaction; every other mutation is a single statement.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use casa_dulce_core::{OrderId, OrderStatus, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::cart::CartLine;
use crate::models::order::{Order, OrderDetails, OrderStats};

/// Raw `orders` row.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i32,
    user_id: i32,
    product_id: i32,
    quantity: i32,
    delivery_date: NaiveDate,
    status: String,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        Ok(Order {
            id: OrderId::new(self.id),
            user_id: UserId::new(self.user_id),
            product_id: ProductId::new(self.product_id),
            quantity: parse_quantity(self.quantity)?,
            delivery_date: self.delivery_date,
            status: parse_status(&self.status)?,
        })
    }
}

/// Raw joined row for the admin listing.
#[derive(sqlx::FromRow)]
struct OrderDetailsRow {
    id: i32,
    customer_name: String,
    product_name: String,
    unit_price: Decimal,
    quantity: i32,
    delivery_date: NaiveDate,
    status: String,
}

impl OrderDetailsRow {
    fn into_details(self) -> Result<OrderDetails, RepositoryError> {
        let unit_price = Price::new(self.unit_price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(OrderDetails {
            id: OrderId::new(self.id),
            customer_name: self.customer_name,
            product_name: self.product_name,
            unit_price,
            quantity: parse_quantity(self.quantity)?,
            delivery_date: self.delivery_date,
            status: parse_status(&self.status)?,
        })
    }
}

fn parse_quantity(quantity: i32) -> Result<u32, RepositoryError> {
    u32::try_from(quantity).map_err(|_| {
        RepositoryError::DataCorruption(format!("non-positive quantity in database: {quantity}"))
    })
}

fn parse_status(status: &str) -> Result<OrderStatus, RepositoryError> {
    status
        .parse::<OrderStatus>()
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid status in database: {e}")))
}

fn encode_quantity(quantity: u32) -> Result<i32, RepositoryError> {
    i32::try_from(quantity)
        .map_err(|_| RepositoryError::Conflict(format!("quantity out of range: {quantity}")))
}

/// Map a foreign-key violation to `NotFound`: the referenced user or
/// product row does not exist.
fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::NotFound;
    }
    RepositoryError::Database(e)
}

/// Repository for order ledger operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a single order with status `pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user or product reference
    /// does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
        delivery_date: NaiveDate,
    ) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO storefront.orders (user_id, product_id, quantity, delivery_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, product_id, quantity, delivery_date, status
            ",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(encode_quantity(quantity)?)
        .bind(delivery_date)
        .bind(OrderStatus::Pending)
        .fetch_one(self.pool)
        .await
        .map_err(map_insert_error)?;

        row.into_order()
    }

    /// Insert one `pending` order per cart line, all-or-nothing.
    ///
    /// Every insert runs inside a single transaction: if any line fails,
    /// the transaction rolls back and the ledger is untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if any line references a missing
    /// user or product.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_batch(
        &self,
        user_id: UserId,
        lines: &[CartLine],
        delivery_date: NaiveDate,
    ) -> Result<usize, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for line in lines {
            sqlx::query(
                r"
                INSERT INTO storefront.orders (user_id, product_id, quantity, delivery_date, status)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(user_id)
            .bind(line.product_id)
            .bind(encode_quantity(line.quantity)?)
            .bind(delivery_date)
            .bind(OrderStatus::Pending)
            .execute(&mut *tx)
            .await
            .map_err(map_insert_error)?;
        }

        tx.commit().await?;

        Ok(lines.len())
    }

    /// Set an order's status to `delivered`.
    ///
    /// Unconditional and idempotent: marking an already delivered order is
    /// a harmless no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn mark_delivered(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE storefront.orders
            SET status = $1
            WHERE id = $2
            ",
        )
        .bind(OrderStatus::Delivered)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an order regardless of status, returning the status it had.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OrderId) -> Result<OrderStatus, RepositoryError> {
        let row = sqlx::query_scalar::<_, String>(
            r"
            DELETE FROM storefront.orders
            WHERE id = $1
            RETURNING status
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(status) => parse_status(&status),
            None => Err(RepositoryError::NotFound),
        }
    }

    /// List orders joined with customer and product display data, in
    /// insertion order, optionally filtered to one status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_details(
        &self,
        filter: Option<OrderStatus>,
    ) -> Result<Vec<OrderDetails>, RepositoryError> {
        const BASE_QUERY: &str = r"
            SELECT o.id, u.name AS customer_name, p.name AS product_name,
                   p.price AS unit_price, o.quantity, o.delivery_date, o.status
            FROM storefront.orders o
            JOIN storefront.users u ON o.user_id = u.id
            JOIN storefront.products p ON o.product_id = p.id
        ";

        let rows = match filter {
            Some(status) => {
                let query = format!("{BASE_QUERY} WHERE o.status = $1 ORDER BY o.id");
                sqlx::query_as::<_, OrderDetailsRow>(&query)
                    .bind(status)
                    .fetch_all(self.pool)
                    .await?
            }
            None => {
                let query = format!("{BASE_QUERY} ORDER BY o.id");
                sqlx::query_as::<_, OrderDetailsRow>(&query)
                    .fetch_all(self.pool)
                    .await?
            }
        };

        rows.into_iter().map(OrderDetailsRow::into_details).collect()
    }

    /// Count orders by status.
    ///
    /// The three counters come from one query over one snapshot, so
    /// `pending + delivered == total` holds in the result.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self) -> Result<OrderStats, RepositoryError> {
        let (total, pending, delivered) = sqlx::query_as::<_, (i64, i64, i64)>(
            r"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'pending'),
                   COUNT(*) FILTER (WHERE status = 'delivered')
            FROM storefront.orders
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(OrderStats {
            total,
            pending,
            delivered,
        })
    }

    /// Total revenue over delivered orders: `SUM(quantity * unit_price)`,
    /// with 0 as the empty-set value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delivered_revenue(&self) -> Result<Decimal, RepositoryError> {
        let total = sqlx::query_scalar::<_, Decimal>(
            r"
            SELECT COALESCE(SUM(o.quantity * p.price), 0)
            FROM storefront.orders o
            JOIN storefront.products p ON o.product_id = p.id
            WHERE o.status = 'delivered'
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(total)
    }
}
