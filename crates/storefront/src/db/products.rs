//! Product repository for catalog reads and startup seeding.

use rust_decimal::Decimal;
use sqlx::PgPool;

use casa_dulce_core::{Price, ProductId};

use super::RepositoryError;
use crate::models::product::Product;

/// The default catalog, inserted at startup if absent.
const DEFAULT_CATALOG: &[(i32, &str, i64)] = &[
    (1, "Torta Chocolinas", 4500),
    (2, "Cheesecake", 5200),
    (3, "Brownies", 3000),
];

/// Raw `products` row.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: Decimal,
}

impl ProductRow {
    fn into_product(self) -> Result<Product, RepositoryError> {
        let price = Price::new(self.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            price,
        })
    }
}

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full catalog in id order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price
            FROM storefront.products
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price
            FROM storefront.products
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Seed the default catalog.
    ///
    /// Idempotent: rows that already exist are left untouched, and the id
    /// sequence is advanced past the seeded ids so later inserts don't
    /// collide.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn seed_defaults(&self) -> Result<(), RepositoryError> {
        for &(id, name, price) in DEFAULT_CATALOG {
            sqlx::query(
                r"
                INSERT INTO storefront.products (id, name, price)
                VALUES ($1, $2, $3)
                ON CONFLICT (id) DO NOTHING
                ",
            )
            .bind(id)
            .bind(name)
            .bind(Decimal::from(price))
            .execute(self.pool)
            .await?;
        }

        sqlx::query(
            r"
            SELECT setval(
                pg_get_serial_sequence('storefront.products', 'id'),
                (SELECT COALESCE(MAX(id), 1) FROM storefront.products)
            )
            ",
        )
        .execute(self.pool)
        .await?;

        tracing::info!(products = DEFAULT_CATALOG.len(), "catalog seeded");

        Ok(())
    }
}
