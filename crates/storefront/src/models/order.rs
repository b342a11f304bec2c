//! Order domain types.
//!
//! Orders reference users and products by id rather than embedding them;
//! the ledger stays the single source of truth for status.

use chrono::NaiveDate;
use serde::Serialize;

use casa_dulce_core::{OrderId, OrderStatus, Price, ProductId, UserId};

/// A single order row in the ledger.
///
/// One order covers one product line. Quantity, product, and delivery date
/// are fixed at creation; only the status ever changes afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Owning user.
    pub user_id: UserId,
    /// Ordered product.
    pub product_id: ProductId,
    /// Units ordered, always at least 1.
    pub quantity: u32,
    /// Requested delivery date (no time component).
    pub delivery_date: NaiveDate,
    /// Lifecycle status.
    pub status: OrderStatus,
}

/// An order joined with its customer and product display data, for the
/// admin listing.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    /// Unique order ID.
    pub id: OrderId,
    /// Customer display name.
    pub customer_name: String,
    /// Product display name.
    pub product_name: String,
    /// Product unit price.
    pub unit_price: Price,
    /// Units ordered.
    pub quantity: u32,
    /// Requested delivery date.
    pub delivery_date: NaiveDate,
    /// Lifecycle status.
    pub status: OrderStatus,
}

/// Counts of orders by status.
///
/// `pending + delivered == total` always holds: both counters partition the
/// same set of rows in one query.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OrderStats {
    /// All orders.
    pub total: i64,
    /// Orders awaiting delivery.
    pub pending: i64,
    /// Delivered orders.
    pub delivered: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_serialize_shape() {
        let stats = OrderStats {
            total: 3,
            pending: 2,
            delivered: 1,
        };
        let json = serde_json::to_value(stats).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"total": 3, "pending": 2, "delivered": 1})
        );
    }

    #[test]
    fn test_order_details_serialize_status_and_date() {
        let details = OrderDetails {
            id: OrderId::new(1),
            customer_name: "Ana".to_string(),
            product_name: "Brownies".to_string(),
            unit_price: casa_dulce_core::Price::zero(),
            quantity: 2,
            delivery_date: NaiveDate::from_ymd_opt(2026, 8, 7).expect("valid date"),
            status: OrderStatus::Pending,
        };
        let json = serde_json::to_value(details).expect("serialize");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["delivery_date"], "2026-08-07");
    }
}
