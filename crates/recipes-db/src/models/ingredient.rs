//! Ingredient catalog entity and its DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ingredient {
    pub id: DbId,
    pub name: String,
    pub category: String,
    /// Default measurement unit, e.g. "g" or "pcs".
    pub unit: String,
    pub description: Option<String>,
    pub calories_per_unit: Option<f64>,
    pub image: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateIngredient {
    pub name: String,
    pub category: String,
    pub unit: String,
    pub description: Option<String>,
    pub calories_per_unit: Option<f64>,
    pub image: Option<String>,
}

/// Partial-update DTO; only provided fields change.
#[derive(Debug, Deserialize)]
pub struct UpdateIngredient {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub description: Option<String>,
    pub calories_per_unit: Option<f64>,
    pub image: Option<String>,
}

/// Listing filters: `category` is an exact match, `search` a
/// case-insensitive substring match over name and description.
#[derive(Debug, Default)]
pub struct IngredientFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}
