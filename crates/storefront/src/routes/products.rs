//! Catalog route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::Product;
use crate::state::AppState;

/// List the catalog.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}
