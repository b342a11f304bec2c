//! Checkout coordinator.
//!
//! Converts the session cart into ledger orders: one `pending` order per
//! cart line, all dated today, written in a single transaction. Either
//! every line becomes an order and the cart ends up empty, or nothing is
//! persisted and the cart is put back for retry.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use thiserror::Error;
use tower_sessions::Session;

use casa_dulce_core::UserId;

use crate::db::RepositoryError;
use crate::db::orders::OrderRepository;
use crate::services::cart;

/// Result of a checkout attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Orders were placed and the cart is now empty.
    Placed {
        /// Number of orders created (one per cart line).
        order_count: usize,
        /// Delivery date applied to every order.
        delivery_date: NaiveDate,
    },
    /// The cart was empty; the ledger was not touched.
    EmptyCart,
}

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The order write failed and rolled back; the cart was restored.
    #[error("checkout aborted, no orders were persisted: {0}")]
    Aborted(#[source] RepositoryError),

    /// The session store failed.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Coordinates the atomic cart-to-orders conversion.
pub struct CheckoutService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Convert the session's cart into ledger orders.
    ///
    /// The cart is taken out of the session first; on a failed write it is
    /// put back, so a concurrent checkout from the same session observes
    /// either the pre- or post-checkout cart.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Aborted`] if the transactional write failed.
    /// In that case nothing was persisted and the cart is unchanged.
    pub async fn checkout(
        &self,
        session: &Session,
        user_id: UserId,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let cart = cart::take(session).await?;

        if cart.is_empty() {
            return Ok(CheckoutOutcome::EmptyCart);
        }

        // One delivery date for the whole cart: today's calendar date.
        let delivery_date = Utc::now().date_naive();

        match self
            .orders
            .create_batch(user_id, cart.lines(), delivery_date)
            .await
        {
            Ok(order_count) => {
                tracing::info!(%user_id, order_count, "checkout complete");
                Ok(CheckoutOutcome::Placed {
                    order_count,
                    delivery_date,
                })
            }
            Err(e) => {
                if let Err(restore_err) = cart::save(session, &cart).await {
                    tracing::error!(
                        error = %restore_err,
                        "failed to restore cart after aborted checkout"
                    );
                }
                Err(CheckoutError::Aborted(e))
            }
        }
    }
}
