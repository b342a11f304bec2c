//! Payment stub route handler.
//!
//! Collection only: every well-formed payment is approved and nothing is
//! settled or stored. Card data never reaches logs or the database.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;

/// Payment form fields. Deliberately no `Debug` impl: card data must not
/// end up in logs.
#[derive(Deserialize)]
pub struct PaymentRequest {
    pub name_on_card: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
}

/// Payment stub response.
#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub status: &'static str,
}

/// Collect payment details and approve.
pub async fn pay(
    RequireAuth(_user): RequireAuth,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<PaymentResponse>> {
    let fields = [
        &request.name_on_card,
        &request.card_number,
        &request.expiry,
        &request.cvv,
    ];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::BadRequest(
            "all payment fields are required".to_string(),
        ));
    }

    Ok(Json(PaymentResponse { status: "approved" }))
}
