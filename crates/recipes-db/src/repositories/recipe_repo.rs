//! Repository for recipes and their ingredient lines.

use sqlx::types::Json;
use sqlx::PgPool;
use tracker_core::page::PageRequest;
use tracker_core::types::DbId;

use crate::models::recipe::{
    CreateRecipe, Recipe, RecipeFilter, RecipeIngredientDetail, RecipeIngredientInput,
    UpdateRecipe,
};

const COLUMNS: &str =
    "id, title, description, cooking_time, difficulty, instructions, image_url, owner_id, created_at";

/// Shared WHERE clause for filtered listing. `$3` keeps recipes with at
/// least one ingredient in the category; `$4` keeps recipes containing any
/// of the given ingredient ids.
const FILTER: &str = "($1::int4 IS NULL OR cooking_time <= $1)
       AND ($2::text IS NULL OR difficulty = $2)
       AND ($3::text IS NULL OR EXISTS (
            SELECT 1 FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = recipes.id AND i.category = $3))
       AND ($4::int8[] IS NULL OR EXISTS (
            SELECT 1 FROM recipe_ingredients ri
            WHERE ri.recipe_id = recipes.id AND ri.ingredient_id = ANY($4)))";

pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a recipe and its ingredient lines in one transaction.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateRecipe,
    ) -> Result<Recipe, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO recipes
                (title, description, cooking_time, difficulty, instructions, image_url, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.cooking_time)
            .bind(&input.difficulty)
            .bind(Json(&input.instructions))
            .bind(&input.image_url)
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;

        insert_lines(&mut tx, recipe.id, &input.ingredients).await?;

        tx.commit().await?;
        Ok(recipe)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The recipe's ingredient lines with catalog details, in line order.
    pub async fn ingredients_for(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<RecipeIngredientDetail>, sqlx::Error> {
        sqlx::query_as::<_, RecipeIngredientDetail>(
            "SELECT ri.ingredient_id, i.name, i.category, i.unit, ri.quantity, ri.note
             FROM recipe_ingredients ri
             JOIN ingredients i ON i.id = ri.ingredient_id
             WHERE ri.recipe_id = $1
             ORDER BY ri.id",
        )
        .bind(recipe_id)
        .fetch_all(pool)
        .await
    }

    /// One page of filtered recipes plus the total, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<(Vec<Recipe>, i64), sqlx::Error> {
        let count_query = format!("SELECT COUNT(*) FROM recipes WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(filter.max_time)
            .bind(&filter.difficulty)
            .bind(&filter.category)
            .bind(filter.ingredient_ids.as_deref())
            .fetch_one(pool)
            .await?;

        let list_query = format!(
            "SELECT {COLUMNS} FROM recipes WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        let items = sqlx::query_as::<_, Recipe>(&list_query)
            .bind(filter.max_time)
            .bind(&filter.difficulty)
            .bind(&filter.category)
            .bind(filter.ingredient_ids.as_deref())
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((items, total))
    }

    /// Recipes containing every one of the given ingredients.
    ///
    /// A recipe matches when the count of its DISTINCT ingredient ids that
    /// appear in the query list equals the list's (deduplicated) length, so
    /// supersets match and partial overlaps do not. An empty id list means
    /// no ingredient constraint at all. The optional filters narrow the
    /// result the same way as [`RecipeRepo::list`].
    pub async fn find_by_ingredients(
        pool: &PgPool,
        ingredient_ids: &[DbId],
        max_time: Option<i32>,
        difficulty: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Recipe>, sqlx::Error> {
        let mut ids = ingredient_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        if ids.is_empty() {
            let query = format!(
                "SELECT {COLUMNS} FROM recipes
                 WHERE ($1::int4 IS NULL OR cooking_time <= $1)
                   AND ($2::text IS NULL OR difficulty = $2)
                   AND ($3::text IS NULL OR EXISTS (
                        SELECT 1 FROM recipe_ingredients ri
                        JOIN ingredients i ON i.id = ri.ingredient_id
                        WHERE ri.recipe_id = recipes.id AND i.category = $3))
                 ORDER BY created_at DESC, id DESC"
            );
            return sqlx::query_as::<_, Recipe>(&query)
                .bind(max_time)
                .bind(difficulty)
                .bind(category)
                .fetch_all(pool)
                .await;
        }

        let query = "SELECT r.id, r.title, r.description, r.cooking_time, r.difficulty,
                    r.instructions, r.image_url, r.owner_id, r.created_at
             FROM recipes r
             JOIN recipe_ingredients ri ON ri.recipe_id = r.id
             WHERE ri.ingredient_id = ANY($1)
               AND ($2::int4 IS NULL OR r.cooking_time <= $2)
               AND ($3::text IS NULL OR r.difficulty = $3)
               AND ($4::text IS NULL OR EXISTS (
                    SELECT 1 FROM recipe_ingredients ri2
                    JOIN ingredients i ON i.id = ri2.ingredient_id
                    WHERE ri2.recipe_id = r.id AND i.category = $4))
             GROUP BY r.id
             HAVING COUNT(DISTINCT ri.ingredient_id) = $5
             ORDER BY r.created_at DESC, r.id DESC";
        sqlx::query_as::<_, Recipe>(query)
            .bind(&ids)
            .bind(max_time)
            .bind(difficulty)
            .bind(category)
            .bind(ids.len() as i64)
            .fetch_all(pool)
            .await
    }

    /// Partial update; when `ingredients` is provided the whole line set is
    /// replaced. Runs in one transaction.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRecipe,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE recipes SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                cooking_time = COALESCE($4, cooking_time),
                difficulty = COALESCE($5, difficulty),
                instructions = COALESCE($6, instructions),
                image_url = COALESCE($7, image_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.cooking_time)
            .bind(&input.difficulty)
            .bind(input.instructions.as_ref().map(Json))
            .bind(&input.image_url)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(recipe) = recipe else {
            return Ok(None);
        };

        if let Some(lines) = &input.ingredients {
            sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_lines(&mut tx, id, lines).await?;
        }

        tx.commit().await?;
        Ok(Some(recipe))
    }

    /// Delete a recipe; its lines and tracking rows cascade away.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

async fn insert_lines(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    recipe_id: DbId,
    lines: &[RecipeIngredientInput],
) -> Result<(), sqlx::Error> {
    for line in lines {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, note)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(recipe_id)
        .bind(line.ingredient_id)
        .bind(line.quantity)
        .bind(&line.note)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
