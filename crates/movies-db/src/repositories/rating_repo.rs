//! Repository for ratings.

use sqlx::PgPool;
use tracker_core::page::PageRequest;
use tracker_core::types::DbId;

use crate::models::rating::{Rating, RatingFilter, RatingWithTitle, UpsertRating};

const COLUMNS: &str = "id, user_id, title_id, score, created_at, updated_at";

pub struct RatingRepo;

impl RatingRepo {
    /// Submit or replace the caller's score for a title.
    ///
    /// Atomic upsert on (user_id, title_id). Score range is validated by
    /// the handler and enforced again by `ck_ratings_score`.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertRating,
    ) -> Result<Rating, sqlx::Error> {
        let query = format!(
            "INSERT INTO ratings (user_id, title_id, score)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_ratings_user_title
             DO UPDATE SET score = EXCLUDED.score, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Rating>(&query)
            .bind(user_id)
            .bind(input.title_id)
            .bind(input.score)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Rating>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ratings WHERE id = $1");
        sqlx::query_as::<_, Rating>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of ratings matching the filter, plus the total.
    pub async fn list(
        pool: &PgPool,
        filter: &RatingFilter,
        page: PageRequest,
    ) -> Result<(Vec<RatingWithTitle>, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM ratings
             WHERE ($1::int8 IS NULL OR title_id = $1)
               AND ($2::int8 IS NULL OR user_id = $2)",
        )
        .bind(filter.title_id)
        .bind(filter.user_id)
        .fetch_one(pool)
        .await?;

        let items = sqlx::query_as::<_, RatingWithTitle>(
            "SELECT r.id, r.user_id, r.title_id, t.name AS title_name, r.score
             FROM ratings r
             JOIN titles t ON t.id = r.title_id
             WHERE ($1::int8 IS NULL OR r.title_id = $1)
               AND ($2::int8 IS NULL OR r.user_id = $2)
             ORDER BY r.id
             LIMIT $3 OFFSET $4",
        )
        .bind(filter.title_id)
        .bind(filter.user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

        Ok((items, total))
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM ratings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
