//! Session-scoped shopping cart.
//!
//! A cart is an ordered sequence of lines, at most one per product. It lives
//! only in the session: nothing here touches durable storage. Checkout takes
//! the whole cart and turns it into order rows in one transaction.

use serde::{Deserialize, Serialize};

use casa_dulce_core::ProductId;

/// One cart line: a product and how many of it.
///
/// Invariant: `quantity >= 1`. Quantities are validated at the HTTP
/// boundary; [`Cart::add`] refuses to create zero-quantity lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

/// An ordered collection of cart lines, scoped to one session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Quantities are capped so a line always fits the ledger's integer
    /// column.
    pub const MAX_LINE_QUANTITY: u32 = i32::MAX.unsigned_abs();

    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of a product.
    ///
    /// If a line for the product already exists its quantity is incremented;
    /// otherwise a new line is appended at the end. Accumulation saturates
    /// at [`Self::MAX_LINE_QUANTITY`]. A zero quantity is ignored.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = line
                .quantity
                .saturating_add(quantity)
                .min(Self::MAX_LINE_QUANTITY);
        } else {
            self.lines.push(CartLine {
                product_id,
                quantity: quantity.min(Self::MAX_LINE_QUANTITY),
            });
        }
    }

    /// Remove every line for a product. No-op if the product is not in the
    /// cart; calling twice is safe.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// True if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32) -> ProductId {
        ProductId::new(id)
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.lines(), &[]);
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        cart.add(product(1), 2);
        cart.add(product(1), 3);

        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.lines(),
            &[CartLine {
                product_id: product(1),
                quantity: 5
            }]
        );
    }

    #[test]
    fn test_add_keeps_one_line_per_product() {
        let mut cart = Cart::new();
        cart.add(product(1), 1);
        cart.add(product(2), 4);
        cart.add(product(1), 2);
        cart.add(product(3), 1);
        cart.add(product(2), 1);

        // One line per distinct product, quantity summed per product
        assert_eq!(cart.len(), 3);
        let quantities: Vec<(i32, u32)> = cart
            .lines()
            .iter()
            .map(|l| (l.product_id.as_i32(), l.quantity))
            .collect();
        assert_eq!(quantities, vec![(1, 3), (2, 5), (3, 1)]);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(product(9), 1);
        cart.add(product(4), 1);
        cart.add(product(9), 1);

        let order: Vec<i32> = cart.lines().iter().map(|l| l.product_id.as_i32()).collect();
        assert_eq!(order, vec![9, 4]);
    }

    #[test]
    fn test_add_zero_quantity_is_ignored() {
        let mut cart = Cart::new();
        cart.add(product(1), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_saturates_at_max() {
        let mut cart = Cart::new();
        cart.add(product(1), Cart::MAX_LINE_QUANTITY);
        cart.add(product(1), 10);
        assert_eq!(cart.lines()[0].quantity, Cart::MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(product(1), 2);
        cart.add(product(2), 1);

        cart.remove(product(1));
        assert!(!cart.lines().iter().any(|l| l.product_id == product(1)));

        // Second removal is a safe no-op
        cart.remove(product(1));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_absent_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(product(1), 2);
        cart.remove(product(42));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_total_quantity() {
        let mut cart = Cart::new();
        cart.add(product(1), 2);
        cart.add(product(2), 3);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add(product(1), 5);

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.lines(), cart.lines());
    }
}
