//! Session-backed cart storage.
//!
//! The cart is keyed state owned by the session store; these helpers are
//! the only code that reads or writes it. An absent cart reads as the
//! empty cart, so viewing never fails.

use tower_sessions::{Session, session};

use crate::models::{Cart, session_keys};

/// Load the session's cart, defaulting to an empty one.
///
/// # Errors
///
/// Returns an error if the session store is unavailable.
pub async fn load(session: &Session) -> Result<Cart, session::Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Persist the cart into the session.
///
/// # Errors
///
/// Returns an error if the session store is unavailable.
pub async fn save(session: &Session, cart: &Cart) -> Result<(), session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Take the cart out of the session, leaving it empty.
///
/// Checkout uses this so a concurrent request observes either the full
/// pre-checkout cart or the cleared one, never a partial state.
///
/// # Errors
///
/// Returns an error if the session store is unavailable.
pub async fn take(session: &Session) -> Result<Cart, session::Error> {
    Ok(session
        .remove::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}
