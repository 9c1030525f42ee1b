//! Repository for the `ingredients` catalog table.

use sqlx::PgPool;
use tracker_core::page::PageRequest;
use tracker_core::types::DbId;

use crate::models::ingredient::{CreateIngredient, Ingredient, IngredientFilter, UpdateIngredient};

const COLUMNS: &str = "id, name, category, unit, description, calories_per_unit, image, created_at";

/// Shared WHERE clause for filtered listing. `search` matches name or
/// description case-insensitively.
const FILTER: &str = "($1::text IS NULL OR category = $1)
       AND ($2::text IS NULL
            OR name ILIKE '%' || $2 || '%'
            OR description ILIKE '%' || $2 || '%')";

pub struct IngredientRepo;

impl IngredientRepo {
    pub async fn create(pool: &PgPool, input: &CreateIngredient) -> Result<Ingredient, sqlx::Error> {
        let query = format!(
            "INSERT INTO ingredients (name, category, unit, description, calories_per_unit, image)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.unit)
            .bind(&input.description)
            .bind(input.calories_per_unit)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ingredients WHERE id = $1");
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of filtered ingredients plus the total matching count, in
    /// insertion order.
    pub async fn list(
        pool: &PgPool,
        filter: &IngredientFilter,
        page: PageRequest,
    ) -> Result<(Vec<Ingredient>, i64), sqlx::Error> {
        let count_query = format!("SELECT COUNT(*) FROM ingredients WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.category)
            .bind(&filter.search)
            .fetch_one(pool)
            .await?;

        let list_query = format!(
            "SELECT {COLUMNS} FROM ingredients WHERE {FILTER}
             ORDER BY id
             LIMIT $3 OFFSET $4"
        );
        let items = sqlx::query_as::<_, Ingredient>(&list_query)
            .bind(&filter.category)
            .bind(&filter.search)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((items, total))
    }

    /// Partial update; only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIngredient,
    ) -> Result<Option<Ingredient>, sqlx::Error> {
        let query = format!(
            "UPDATE ingredients SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                unit = COALESCE($4, unit),
                description = COALESCE($5, description),
                calories_per_unit = COALESCE($6, calories_per_unit),
                image = COALESCE($7, image)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.unit)
            .bind(&input.description)
            .bind(input.calories_per_unit)
            .bind(&input.image)
            .fetch_optional(pool)
            .await
    }

    /// How many recipe lines reference this ingredient. Deletion is
    /// rejected while this is non-zero.
    pub async fn reference_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM recipe_ingredients WHERE ingredient_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
