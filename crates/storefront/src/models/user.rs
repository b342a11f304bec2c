//! User domain types.

use chrono::{DateTime, Utc};

use casa_dulce_core::{Email, UserId, UserRole};

/// A storefront user (domain type).
///
/// Created at registration and immutable afterwards, except for the role,
/// which the CLI can promote to admin.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: Email,
    /// Role gating fulfillment and reporting access.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
