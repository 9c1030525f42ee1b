//! Ratings: one row per (user, title), score 1-10, upsert semantics.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: DbId,
    pub user_id: DbId,
    pub title_id: DbId,
    pub score: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row with the title's name joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RatingWithTitle {
    pub id: DbId,
    pub user_id: DbId,
    pub title_id: DbId,
    pub title_name: String,
    pub score: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpsertRating {
    pub title_id: DbId,
    pub score: i32,
}

/// Conjunctive filters for rating listing.
#[derive(Debug, Default)]
pub struct RatingFilter {
    pub title_id: Option<DbId>,
    pub user_id: Option<DbId>,
}
