//! Ingredient catalog handlers. Reads are open to any authenticated user;
//! writes require the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use recipes_db::models::ingredient::{
    CreateIngredient, Ingredient, IngredientFilter, UpdateIngredient,
};
use recipes_db::repositories::IngredientRepo;
use serde::Deserialize;
use tracker_core::error::CoreError;
use tracker_core::page::{Page, PageRequest};
use tracker_core::types::DbId;
use tracker_web::{AppResult, AuthUser, RequireAdmin};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IngredientListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// `GET /ingredients` with filters and pagination.
pub async fn list_ingredients(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<IngredientListQuery>,
) -> AppResult<Json<Page<Ingredient>>> {
    let filter = IngredientFilter {
        category: query.category,
        search: query.search,
    };
    let request = PageRequest::new(query.page, query.per_page);
    let (items, total) = IngredientRepo::list(&state.pool, &filter, request).await?;
    Ok(Json(Page::new(items, total, request)))
}

/// `POST /ingredients` (admin). Duplicate names surface as 409 through the
/// unique constraint.
pub async fn create_ingredient(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(body): Json<CreateIngredient>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    if body.name.trim().is_empty() {
        return Err(CoreError::validation("Name must not be empty").into());
    }
    if body.category.trim().is_empty() {
        return Err(CoreError::validation("Category must not be empty").into());
    }
    if body.unit.trim().is_empty() {
        return Err(CoreError::validation("Unit must not be empty").into());
    }

    let ingredient = IngredientRepo::create(&state.pool, &body).await?;
    tracing::info!(ingredient_id = ingredient.id, name = %ingredient.name, "ingredient created");
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// `GET /ingredients/{id}`.
pub async fn get_ingredient(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Ingredient>> {
    let ingredient = IngredientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Ingredient", id))?;
    Ok(Json(ingredient))
}

/// `PUT /ingredients/{id}` (admin) — partial update.
pub async fn update_ingredient(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateIngredient>,
) -> AppResult<Json<Ingredient>> {
    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return Err(CoreError::validation("Name must not be empty").into());
        }
    }
    if let Some(unit) = &body.unit {
        if unit.trim().is_empty() {
            return Err(CoreError::validation("Unit must not be empty").into());
        }
    }

    let ingredient = IngredientRepo::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| CoreError::not_found("Ingredient", id))?;
    Ok(Json(ingredient))
}

/// `DELETE /ingredients/{id}` (admin). Rejected with 409 while any recipe
/// references the ingredient.
pub async fn delete_ingredient(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let references = IngredientRepo::reference_count(&state.pool, id).await?;
    if references > 0 {
        return Err(CoreError::conflict(format!(
            "Ingredient is referenced by {references} recipe(s) and cannot be deleted"
        ))
        .into());
    }

    if !IngredientRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Ingredient", id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
