//! Repository for per-user recipe tracking rows.

use sqlx::types::Json;
use sqlx::PgPool;
use tracker_core::types::DbId;

use crate::models::user_recipe::{UpdateUserRecipe, UpsertUserRecipe, UserRecipe};

const COLUMNS: &str =
    "id, user_id, recipe_id, checklist, notes, is_completed, created_at, updated_at";

pub struct UserRecipeRepo;

impl UserRecipeRepo {
    /// Start (or restart) tracking a recipe for the caller.
    ///
    /// Atomic upsert on (user_id, recipe_id): re-tracking replaces the
    /// checklist and notes and bumps `updated_at`; `id`, `created_at`, and
    /// the completion flag are left alone.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertUserRecipe,
    ) -> Result<UserRecipe, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_recipes (user_id, recipe_id, checklist, notes)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_user_recipes_user_recipe
             DO UPDATE SET checklist = EXCLUDED.checklist,
                           notes = EXCLUDED.notes,
                           updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRecipe>(&query)
            .bind(user_id)
            .bind(input.recipe_id)
            .bind(Json(&input.checklist))
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// The caller's tracking row for one recipe.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
    ) -> Result<Option<UserRecipe>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_recipes WHERE user_id = $1 AND recipe_id = $2"
        );
        sqlx::query_as::<_, UserRecipe>(&query)
            .bind(user_id)
            .bind(recipe_id)
            .fetch_optional(pool)
            .await
    }

    /// All of the caller's tracking rows, most recently updated first,
    /// optionally narrowed by completion state.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        is_completed: Option<bool>,
    ) -> Result<Vec<UserRecipe>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_recipes
             WHERE user_id = $1
               AND ($2::bool IS NULL OR is_completed = $2)
             ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, UserRecipe>(&query)
            .bind(user_id)
            .bind(is_completed)
            .fetch_all(pool)
            .await
    }

    /// Partial update of the caller's tracking row; bumps `updated_at`.
    ///
    /// Returns `None` if the caller is not tracking the recipe.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        recipe_id: DbId,
        input: &UpdateUserRecipe,
    ) -> Result<Option<UserRecipe>, sqlx::Error> {
        let query = format!(
            "UPDATE user_recipes SET
                checklist = COALESCE($3, checklist),
                notes = COALESCE($4, notes),
                is_completed = COALESCE($5, is_completed),
                updated_at = NOW()
             WHERE user_id = $1 AND recipe_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRecipe>(&query)
            .bind(user_id)
            .bind(recipe_id)
            .bind(input.checklist.as_ref().map(Json))
            .bind(&input.notes)
            .bind(input.is_completed)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, recipe_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_recipes WHERE user_id = $1 AND recipe_id = $2",
        )
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
