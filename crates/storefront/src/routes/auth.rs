//! Authentication route handlers.
//!
//! Registration, login, and logout. A successful login stores the user's
//! id, name, and role in the session; everything else reads identity from
//! there.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use casa_dulce_core::{UserId, UserRole};

use crate::error::Result;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email.to_string(),
            role: user.role,
        }
    }
}

/// Register a new customer account.
///
/// New accounts always get the customer role; admin is granted only via
/// the CLI.
#[instrument(skip(state, request))]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let auth = AuthService::new(state.pool());
    let user = auth
        .register(&request.name, &request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Login with email and password.
#[instrument(skip(state, session, request))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserResponse>> {
    let auth = AuthService::new(state.pool());
    let user = auth.login(&request.email, &request.password).await?;

    set_current_user(
        &session,
        &CurrentUser {
            id: user.id,
            name: user.name.clone(),
            role: user.role,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(user.into()))
}

/// Logout: drop the identity and the whole session, cart included.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session).await?;
    session.flush().await?;
    Ok(StatusCode::NO_CONTENT)
}
