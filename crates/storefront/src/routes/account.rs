//! Account route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Profile view of the logged-in user.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
}

/// Show the current user's profile.
#[instrument(skip_all)]
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ProfileResponse>> {
    let user = AuthService::new(state.pool()).get_user(user.id).await?;

    Ok(Json(ProfileResponse {
        name: user.name,
        email: user.email.to_string(),
    }))
}
