//! Title catalog entity and its filter/update DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

/// Catalog row. `kind` is exposed as `type` in JSON, matching the public
/// API contract.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Title {
    pub id: DbId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub created_at: Timestamp,
}

/// DTO for creating a title (admin or bulk import).
#[derive(Debug, Deserialize)]
pub struct CreateTitle {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// Partial-update DTO; only provided fields change.
#[derive(Debug, Deserialize)]
pub struct UpdateTitle {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// Conjunctive listing filters. `name`/`genre` are case-insensitive
/// substring matches; `year` is equality; `status` narrows to titles on the
/// viewing user's list with that status.
#[derive(Debug, Default)]
pub struct TitleFilter {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub status: Option<String>,
}
