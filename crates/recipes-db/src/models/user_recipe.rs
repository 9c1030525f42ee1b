//! Per-user recipe tracking: checklist, notes, completion flag.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRecipe {
    pub id: DbId,
    pub user_id: DbId,
    pub recipe_id: DbId,
    pub checklist: Json<Vec<String>>,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for tracking a recipe (upsert on (user, recipe)).
#[derive(Debug, Deserialize)]
pub struct UpsertUserRecipe {
    pub recipe_id: DbId,
    #[serde(default)]
    pub checklist: Vec<String>,
    pub notes: Option<String>,
}

/// Partial-update DTO; only provided fields change, `updated_at` is
/// bumped either way.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRecipe {
    pub checklist: Option<Vec<String>>,
    pub notes: Option<String>,
    pub is_completed: Option<bool>,
}
