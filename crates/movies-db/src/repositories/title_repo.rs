//! Repository for the `titles` catalog table.

use sqlx::PgPool;
use tracker_core::page::PageRequest;
use tracker_core::types::DbId;

use crate::models::title::{CreateTitle, Title, TitleFilter, UpdateTitle};

const COLUMNS: &str = "id, name, kind, genre, year, created_at";

/// Shared WHERE clause for filtered listing. Absent filters collapse to
/// no-ops via the `IS NULL OR` pattern; `$4`/`$5` implement the
/// status-on-the-viewer's-list filter.
const FILTER: &str = "($1::text IS NULL OR name ILIKE '%' || $1 || '%')
       AND ($2::text IS NULL OR genre ILIKE '%' || $2 || '%')
       AND ($3::int4 IS NULL OR year = $3)
       AND ($4::text IS NULL OR EXISTS (
            SELECT 1 FROM list_entries le
            WHERE le.title_id = titles.id
              AND le.user_id = $5
              AND le.status = $4))";

pub struct TitleRepo;

impl TitleRepo {
    /// Insert a new catalog title, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTitle) -> Result<Title, sqlx::Error> {
        let query = format!(
            "INSERT INTO titles (name, kind, genre, year)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Title>(&query)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(&input.genre)
            .bind(input.year)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Title>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM titles WHERE id = $1");
        sqlx::query_as::<_, Title>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact-name lookup used by the bulk importer to skip duplicates.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Title>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM titles WHERE name = $1 LIMIT 1");
        sqlx::query_as::<_, Title>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// One page of filtered titles plus the total matching count.
    ///
    /// `viewer` is the authenticated caller; it only participates when the
    /// `status` filter is set. Insertion order (id) is preserved.
    pub async fn list(
        pool: &PgPool,
        filter: &TitleFilter,
        viewer: DbId,
        page: PageRequest,
    ) -> Result<(Vec<Title>, i64), sqlx::Error> {
        let count_query = format!("SELECT COUNT(*) FROM titles WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&filter.name)
            .bind(&filter.genre)
            .bind(filter.year)
            .bind(&filter.status)
            .bind(viewer)
            .fetch_one(pool)
            .await?;

        let list_query = format!(
            "SELECT {COLUMNS} FROM titles WHERE {FILTER}
             ORDER BY id
             LIMIT $6 OFFSET $7"
        );
        let items = sqlx::query_as::<_, Title>(&list_query)
            .bind(&filter.name)
            .bind(&filter.genre)
            .bind(filter.year)
            .bind(&filter.status)
            .bind(viewer)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((items, total))
    }

    /// Partial update; only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTitle,
    ) -> Result<Option<Title>, sqlx::Error> {
        let query = format!(
            "UPDATE titles SET
                name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                genre = COALESCE($4, genre),
                year = COALESCE($5, year)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Title>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(&input.genre)
            .bind(input.year)
            .fetch_optional(pool)
            .await
    }

    /// Delete a title; personal records referencing it cascade away.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
