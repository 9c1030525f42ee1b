//! Reviews: one row per (user, title); resubmission overwrites the text.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub title_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row with the title's name joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReviewWithTitle {
    pub id: DbId,
    pub user_id: DbId,
    pub title_id: DbId,
    pub title_name: String,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct UpsertReview {
    pub title_id: DbId,
    pub text: String,
}

/// Conjunctive filters for review listing.
#[derive(Debug, Default)]
pub struct ReviewFilter {
    pub title_id: Option<DbId>,
    pub user_id: Option<DbId>,
}
