//! Repository for watchlist entries.

use sqlx::PgPool;
use tracker_core::page::PageRequest;
use tracker_core::types::DbId;

use crate::models::list_entry::{ListEntry, ListEntryWithTitle, UpsertListEntry};

const COLUMNS: &str = "id, user_id, title_id, status, created_at, updated_at";

pub struct ListRepo;

impl ListRepo {
    /// Set the caller's status for a title.
    ///
    /// Atomic upsert on (user_id, title_id): the insert path creates the
    /// row, the conflict path overwrites `status` and bumps `updated_at`
    /// while leaving `id` and `created_at` untouched.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertListEntry,
    ) -> Result<ListEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO list_entries (user_id, title_id, status)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_list_entries_user_title
             DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ListEntry>(&query)
            .bind(user_id)
            .bind(input.title_id)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ListEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM list_entries WHERE id = $1");
        sqlx::query_as::<_, ListEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of the caller's entries with title names, plus the total.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        page: PageRequest,
    ) -> Result<(Vec<ListEntryWithTitle>, i64), sqlx::Error> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM list_entries WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(pool)
                .await?;

        let items = sqlx::query_as::<_, ListEntryWithTitle>(
            "SELECT le.id, le.title_id, t.name AS title_name, le.status
             FROM list_entries le
             JOIN titles t ON t.id = le.title_id
             WHERE le.user_id = $1
             ORDER BY le.id
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

        Ok((items, total))
    }

    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM list_entries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
