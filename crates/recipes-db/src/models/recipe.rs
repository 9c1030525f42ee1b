//! Recipe entity, its nested ingredient list, and the listing filters.
//!
//! Instruction steps are stored as a JSONB array and mapped through
//! [`sqlx::types::Json`], so the ordered list round-trips without a join
//! table.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use tracker_core::types::{DbId, Timestamp};

/// Accepted difficulty levels.
pub const DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub cooking_time: i32,
    pub difficulty: String,
    pub instructions: Json<Vec<String>>,
    pub image_url: Option<String>,
    pub owner_id: DbId,
    pub created_at: Timestamp,
}

/// One ingredient reference inside a create/update payload. The quantity
/// is measured in the ingredient's own unit; `note` carries free-form
/// preparation hints ("finely chopped").
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeIngredientInput {
    pub ingredient_id: DbId,
    pub quantity: f64,
    pub note: Option<String>,
}

/// Ingredient line as returned inside a recipe, with catalog details
/// joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeIngredientDetail {
    pub ingredient_id: DbId,
    pub name: String,
    pub category: String,
    pub unit: String,
    pub quantity: f64,
    pub note: Option<String>,
}

/// Full recipe as exposed by the API: the row plus its ingredient lines.
#[derive(Debug, Serialize)]
pub struct RecipeResponse {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredientDetail>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecipe {
    pub title: String,
    pub description: String,
    pub cooking_time: i32,
    pub difficulty: String,
    pub instructions: Vec<String>,
    pub image_url: Option<String>,
    pub ingredients: Vec<RecipeIngredientInput>,
}

/// Partial-update DTO. When `ingredients` is present the whole join set is
/// replaced.
#[derive(Debug, Deserialize)]
pub struct UpdateRecipe {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cooking_time: Option<i32>,
    pub difficulty: Option<String>,
    pub instructions: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub ingredients: Option<Vec<RecipeIngredientInput>>,
}

/// Conjunctive listing filters. `ingredient_ids` keeps recipes containing
/// any of the ids; `category` keeps recipes with at least one ingredient in
/// that category.
#[derive(Debug, Default)]
pub struct RecipeFilter {
    pub max_time: Option<i32>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub ingredient_ids: Option<Vec<DbId>>,
}
