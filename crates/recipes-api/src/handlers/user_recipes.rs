//! Per-user recipe tracking handlers. Every query is scoped to the
//! authenticated caller; one user can never see another's rows.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use recipes_db::models::recipe::RecipeResponse;
use recipes_db::models::user_recipe::{UpdateUserRecipe, UpsertUserRecipe, UserRecipe};
use recipes_db::repositories::{RecipeRepo, UserRecipeRepo};
use serde::{Deserialize, Serialize};
use tracker_core::error::CoreError;
use tracker_core::types::DbId;
use tracker_web::{AppResult, AuthUser};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserRecipeListQuery {
    pub is_completed: Option<bool>,
}

/// Tracking row with its recipe embedded, as returned by the list
/// endpoint.
#[derive(Debug, Serialize)]
pub struct TrackedRecipe {
    #[serde(flatten)]
    pub tracking: UserRecipe,
    pub recipe: RecipeResponse,
}

/// `POST /user-recipes` — start (or restart) tracking a recipe.
pub async fn track_recipe(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<UpsertUserRecipe>,
) -> AppResult<(StatusCode, Json<UserRecipe>)> {
    RecipeRepo::find_by_id(&state.pool, body.recipe_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Recipe", body.recipe_id))?;

    let row = UserRecipeRepo::upsert(&state.pool, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /user-recipes` — the caller's tracked recipes, most recently
/// updated first, each with the full recipe embedded.
pub async fn list_tracked(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<UserRecipeListQuery>,
) -> AppResult<Json<Vec<TrackedRecipe>>> {
    let rows = UserRecipeRepo::list_for_user(&state.pool, user.user_id, query.is_completed).await?;

    let mut results = Vec::with_capacity(rows.len());
    for tracking in rows {
        let recipe = RecipeRepo::find_by_id(&state.pool, tracking.recipe_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Recipe", tracking.recipe_id))?;
        let ingredients = RecipeRepo::ingredients_for(&state.pool, recipe.id).await?;
        results.push(TrackedRecipe {
            tracking,
            recipe: RecipeResponse {
                recipe,
                ingredients,
            },
        });
    }
    Ok(Json(results))
}

/// `GET /user-recipes/{recipe_id}` — the caller's row for one recipe.
pub async fn get_tracked(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<DbId>,
) -> AppResult<Json<UserRecipe>> {
    let row = UserRecipeRepo::find(&state.pool, user.user_id, recipe_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User recipe", recipe_id))?;
    Ok(Json(row))
}

/// `PUT /user-recipes/{recipe_id}` — partial update of checklist, notes,
/// or completion.
pub async fn update_tracked(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<DbId>,
    Json(body): Json<UpdateUserRecipe>,
) -> AppResult<Json<UserRecipe>> {
    let row = UserRecipeRepo::update(&state.pool, user.user_id, recipe_id, &body)
        .await?
        .ok_or_else(|| CoreError::not_found("User recipe", recipe_id))?;
    Ok(Json(row))
}

/// `DELETE /user-recipes/{recipe_id}` — stop tracking.
pub async fn delete_tracked(
    State(state): State<AppState>,
    user: AuthUser,
    Path(recipe_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !UserRecipeRepo::delete(&state.pool, user.user_id, recipe_id).await? {
        return Err(CoreError::not_found("User recipe", recipe_id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
