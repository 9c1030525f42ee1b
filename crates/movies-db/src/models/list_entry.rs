//! Watchlist entries: one row per (user, title), upsert semantics.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

/// Watch statuses a title can be in on a user's list.
pub const LIST_STATUSES: &[&str] = &["watching", "planned", "completed", "dropped"];

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub title_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row with the title's name joined in for display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListEntryWithTitle {
    pub id: DbId,
    pub title_id: DbId,
    pub title_name: String,
    pub status: String,
}

/// Upsert payload: sets the caller's status for a title.
#[derive(Debug, Deserialize)]
pub struct UpsertListEntry {
    pub title_id: DbId,
    pub status: String,
}
