//! Repository for reviews.

use sqlx::PgPool;
use tracker_core::page::PageRequest;
use tracker_core::types::DbId;

use crate::models::review::{Review, ReviewFilter, ReviewWithTitle, UpsertReview};

const COLUMNS: &str = "id, user_id, title_id, text, created_at, updated_at";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Submit or replace the caller's review for a title.
    ///
    /// Atomic upsert on (user_id, title_id): resubmission overwrites the
    /// text and bumps `updated_at`; `id` and `created_at` stay put.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertReview,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (user_id, title_id, text)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_reviews_user_title
             DO UPDATE SET text = EXCLUDED.text, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(user_id)
            .bind(input.title_id)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of reviews matching the filter, plus the total.
    pub async fn list(
        pool: &PgPool,
        filter: &ReviewFilter,
        page: PageRequest,
    ) -> Result<(Vec<ReviewWithTitle>, i64), sqlx::Error> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reviews
             WHERE ($1::int8 IS NULL OR title_id = $1)
               AND ($2::int8 IS NULL OR user_id = $2)",
        )
        .bind(filter.title_id)
        .bind(filter.user_id)
        .fetch_one(pool)
        .await?;

        let items = sqlx::query_as::<_, ReviewWithTitle>(
            "SELECT r.id, r.user_id, r.title_id, t.name AS title_name,
                    r.text, r.created_at, r.updated_at
             FROM reviews r
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
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
