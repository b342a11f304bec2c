//! Product domain types.

use serde::Serialize;

use casa_dulce_core::{Price, ProductId};

/// A catalog product.
///
/// Static reference data: seeded once at startup and read-only from the
/// storefront's perspective.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
}
