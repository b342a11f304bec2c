//! Cart route handlers.
//!
//! All cart mutations touch session state only; nothing is written to the
//! ledger until checkout.

use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use casa_dulce_core::ProductId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::CartLine;
use crate::services::cart;
use crate::services::checkout::{CheckoutOutcome, CheckoutService};
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove-from-cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Confirmation returned by cart mutations.
#[derive(Debug, Serialize)]
pub struct CartConfirmation {
    /// Number of distinct lines in the cart.
    pub lines: usize,
    /// Total units across all lines.
    pub total_quantity: u64,
}

/// Checkout result body.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutResponse {
    /// Orders were created and the cart is now empty.
    Placed {
        order_count: usize,
        delivery_date: NaiveDate,
    },
    /// The cart was empty; nothing was written.
    CartEmpty,
}

impl From<CheckoutOutcome> for CheckoutResponse {
    fn from(outcome: CheckoutOutcome) -> Self {
        match outcome {
            CheckoutOutcome::Placed {
                order_count,
                delivery_date,
            } => Self::Placed {
                order_count,
                delivery_date,
            },
            CheckoutOutcome::EmptyCart => Self::CartEmpty,
        }
    }
}

/// View the session cart.
///
/// An uninitialized cart is just the empty sequence.
#[instrument(skip_all)]
pub async fn show(
    RequireAuth(_user): RequireAuth,
    session: Session,
) -> Result<Json<Vec<CartLine>>> {
    let cart = cart::load(&session).await?;
    Ok(Json(cart.lines().to_vec()))
}

/// Add a product to the cart.
///
/// Merges into the existing line for the product if there is one.
#[instrument(skip_all, fields(product_id = %request.product_id))]
pub async fn add(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartConfirmation>> {
    let quantity = super::parse_quantity(request.quantity)?;

    let mut cart = cart::load(&session).await?;
    cart.add(request.product_id, quantity);
    cart::save(&session, &cart).await?;

    Ok(Json(CartConfirmation {
        lines: cart.len(),
        total_quantity: cart.total_quantity(),
    }))
}

/// Remove every line for a product from the cart.
///
/// Removing a product that isn't in the cart still confirms.
#[instrument(skip_all, fields(product_id = %request.product_id))]
pub async fn remove(
    RequireAuth(_user): RequireAuth,
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartConfirmation>> {
    let mut cart = cart::load(&session).await?;
    cart.remove(request.product_id);
    cart::save(&session, &cart).await?;

    Ok(Json(CartConfirmation {
        lines: cart.len(),
        total_quantity: cart.total_quantity(),
    }))
}

/// Convert the cart into orders.
///
/// On failure nothing is persisted and the cart is left as it was; the
/// error body says so.
#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Json<CheckoutResponse>> {
    let outcome = CheckoutService::new(state.pool())
        .checkout(&session, user.id)
        .await?;

    Ok(Json(outcome.into()))
}
