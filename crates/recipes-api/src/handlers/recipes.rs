//! Recipe handlers. Creation is admin-only; update and delete are
//! restricted to the owning admin.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use recipes_db::models::recipe::{
    CreateRecipe, Recipe, RecipeFilter, RecipeIngredientInput, RecipeResponse, UpdateRecipe,
    DIFFICULTIES,
};
use recipes_db::repositories::{IngredientRepo, RecipeRepo};
use recipes_db::DbPool;
use serde::Deserialize;
use tracker_core::error::CoreError;
use tracker_core::page::{Page, PageRequest};
use tracker_core::types::DbId;
use tracker_web::{AppResult, AuthUser, RequireAdmin};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecipeListQuery {
    pub max_time: Option<i32>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    /// Comma-separated ingredient ids; a recipe matches if it contains any
    /// of them.
    pub ingredient_ids: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct FindByIngredientsRequest {
    pub ingredients: Vec<DbId>,
    pub max_time: Option<i32>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
}

fn check_difficulty(difficulty: &str) -> Result<(), CoreError> {
    if !DIFFICULTIES.contains(&difficulty) {
        return Err(CoreError::validation(format!(
            "Difficulty must be one of: {}",
            DIFFICULTIES.join(", ")
        )));
    }
    Ok(())
}

/// Check the ingredient lines of a create/update payload: positive
/// quantities and existing ingredient ids.
async fn check_lines(pool: &DbPool, lines: &[RecipeIngredientInput]) -> AppResult<()> {
    for line in lines {
        if line.quantity <= 0.0 {
            return Err(CoreError::validation("Ingredient quantities must be positive").into());
        }
        if IngredientRepo::find_by_id(pool, line.ingredient_id)
            .await?
            .is_none()
        {
            return Err(CoreError::validation(format!(
                "Ingredient with id {} does not exist",
                line.ingredient_id
            ))
            .into());
        }
    }
    Ok(())
}

async fn with_ingredients(pool: &DbPool, recipe: Recipe) -> AppResult<RecipeResponse> {
    let ingredients = RecipeRepo::ingredients_for(pool, recipe.id).await?;
    Ok(RecipeResponse {
        recipe,
        ingredients,
    })
}

fn parse_ingredient_ids(raw: &str) -> Result<Vec<DbId>, CoreError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|_| {
                CoreError::validation("ingredient_ids must be a comma-separated list of ids")
            })
        })
        .collect()
}

/// `POST /recipes` (admin) — 201 with the nested ingredient details.
pub async fn create_recipe(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<CreateRecipe>,
) -> AppResult<(StatusCode, Json<RecipeResponse>)> {
    if body.title.trim().is_empty() {
        return Err(CoreError::validation("Title must not be empty").into());
    }
    if body.description.trim().is_empty() {
        return Err(CoreError::validation("Description must not be empty").into());
    }
    if body.cooking_time < 1 {
        return Err(CoreError::validation("Cooking time must be at least 1 minute").into());
    }
    check_difficulty(&body.difficulty)?;
    if body.instructions.is_empty() {
        return Err(CoreError::validation("At least one instruction step is required").into());
    }
    check_lines(&state.pool, &body.ingredients).await?;

    let recipe = RecipeRepo::create(&state.pool, admin.user_id, &body).await?;
    tracing::info!(recipe_id = recipe.id, title = %recipe.title, "recipe created");

    let response = with_ingredients(&state.pool, recipe).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /recipes` with filters and pagination, newest first.
pub async fn list_recipes(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<RecipeListQuery>,
) -> AppResult<Json<Page<Recipe>>> {
    let ingredient_ids = query
        .ingredient_ids
        .as_deref()
        .map(parse_ingredient_ids)
        .transpose()?;

    let filter = RecipeFilter {
        max_time: query.max_time,
        difficulty: query.difficulty,
        category: query.category,
        ingredient_ids,
    };
    let request = PageRequest::new(query.page, query.per_page);
    let (items, total) = RecipeRepo::list(&state.pool, &filter, request).await?;
    Ok(Json(Page::new(items, total, request)))
}

/// `GET /recipes/{id}` — full recipe with ingredient details.
pub async fn get_recipe(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<RecipeResponse>> {
    let recipe = RecipeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Recipe", id))?;
    Ok(Json(with_ingredients(&state.pool, recipe).await?))
}

/// `POST /recipes/find-by-ingredients` — recipes containing every supplied
/// ingredient, newest first. An empty list leaves the ingredient
/// constraint off and returns everything matching the remaining filters.
pub async fn find_by_ingredients(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(body): Json<FindByIngredientsRequest>,
) -> AppResult<Json<Vec<RecipeResponse>>> {
    if let Some(difficulty) = &body.difficulty {
        check_difficulty(difficulty)?;
    }

    let recipes = RecipeRepo::find_by_ingredients(
        &state.pool,
        &body.ingredients,
        body.max_time,
        body.difficulty.as_deref(),
        body.category.as_deref(),
    )
    .await?;

    let mut results = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        results.push(with_ingredients(&state.pool, recipe).await?);
    }
    Ok(Json(results))
}

async fn find_owned(pool: &DbPool, id: DbId, caller: &AuthUser) -> AppResult<Recipe> {
    let recipe = RecipeRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Recipe", id))?;
    if recipe.owner_id != caller.user_id {
        return Err(CoreError::forbidden("You do not own this recipe").into());
    }
    Ok(recipe)
}

/// `PUT /recipes/{id}` — owning admin only; when `ingredients` is provided
/// the whole set is replaced.
pub async fn update_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateRecipe>,
) -> AppResult<Json<RecipeResponse>> {
    find_owned(&state.pool, id, &user).await?;

    if let Some(title) = &body.title {
        if title.trim().is_empty() {
            return Err(CoreError::validation("Title must not be empty").into());
        }
    }
    if let Some(description) = &body.description {
        if description.trim().is_empty() {
            return Err(CoreError::validation("Description must not be empty").into());
        }
    }
    if let Some(cooking_time) = body.cooking_time {
        if cooking_time < 1 {
            return Err(CoreError::validation("Cooking time must be at least 1 minute").into());
        }
    }
    if let Some(difficulty) = &body.difficulty {
        check_difficulty(difficulty)?;
    }
    if let Some(instructions) = &body.instructions {
        if instructions.is_empty() {
            return Err(CoreError::validation("At least one instruction step is required").into());
        }
    }
    if let Some(lines) = &body.ingredients {
        check_lines(&state.pool, lines).await?;
    }

    let recipe = RecipeRepo::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| CoreError::not_found("Recipe", id))?;
    Ok(Json(with_ingredients(&state.pool, recipe).await?))
}

/// `DELETE /recipes/{id}` — owning admin only; join and tracking rows
/// cascade.
pub async fn delete_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state.pool, id, &user).await?;
    RecipeRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
