//! User entity for the movie service.

use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

/// Full user row. Contains the password hash -- never serialize this to an
/// API response; there is deliberately no `Serialize` on it.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a user. The hash is produced by the API layer.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}
