//! Seed the database with reference data.
//!
//! Startup already seeds the catalog; this command exists for refreshing a
//! database that was wiped without restarting the service.

use casa_dulce_storefront::db::{self, ProductRepository};

/// Seed the default product catalog.
///
/// Idempotent: existing rows are left untouched.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the insert fails.
pub async fn products() -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;

    let pool = db::create_pool(&database_url).await?;
    tracing::info!("Connected to database");

    ProductRepository::new(&pool).seed_defaults().await?;

    tracing::info!("Catalog seeding complete");
    Ok(())
}
