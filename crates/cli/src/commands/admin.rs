//! Admin user management commands.
//!
//! There is deliberately no HTTP path to the admin role; it is granted
//! only from here.

use casa_dulce_core::UserRole;
use casa_dulce_storefront::db;
use casa_dulce_storefront::services::auth::AuthService;

/// Create a new user with the admin role.
///
/// Registers the account like any customer, then promotes it.
///
/// # Errors
///
/// Returns an error if the email is invalid or taken, the password is too
/// weak, or the database is unreachable.
pub async fn create_user(
    email: &str,
    name: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let auth = AuthService::new(&pool);
    let user = auth.register(name, email, password).await?;
    auth.set_role(email, UserRole::Admin).await?;

    tracing::info!(user_id = %user.id, %email, "admin user created");
    Ok(())
}

/// Promote an existing user to admin.
///
/// # Errors
///
/// Returns an error if no user has that email or the database is
/// unreachable.
pub async fn promote_user(email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let database_url = super::database_url()?;
    let pool = db::create_pool(&database_url).await?;

    AuthService::new(&pool)
        .set_role(email, UserRole::Admin)
        .await?;

    tracing::info!(%email, "user promoted to admin");
    Ok(())
}
