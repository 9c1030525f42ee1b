//! Watchlist handlers. Always scoped to the authenticated caller.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use movies_db::models::list_entry::{ListEntry, ListEntryWithTitle, UpsertListEntry, LIST_STATUSES};
use movies_db::repositories::{ListRepo, TitleRepo};
use tracker_core::error::CoreError;
use tracker_core::page::Page;
use tracker_core::types::DbId;
use tracker_web::{AppResult, AuthUser, PageQuery};

use crate::state::AppState;

/// `GET /lists` — the caller's entries, title names included.
pub async fn list_entries(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<ListEntryWithTitle>>> {
    let request = query.request();
    let (items, total) = ListRepo::list_for_user(&state.pool, user.user_id, request).await?;
    Ok(Json(Page::new(items, total, request)))
}

/// `POST /lists` — set the caller's status for a title (upsert).
pub async fn upsert_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<UpsertListEntry>,
) -> AppResult<(StatusCode, Json<ListEntry>)> {
    if !LIST_STATUSES.contains(&body.status.as_str()) {
        return Err(CoreError::validation(format!(
            "Status must be one of: {}",
            LIST_STATUSES.join(", ")
        ))
        .into());
    }

    TitleRepo::find_by_id(&state.pool, body.title_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Title", body.title_id))?;

    let entry = ListRepo::upsert(&state.pool, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// `DELETE /lists/{id}` — owner only.
pub async fn delete_entry(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let entry = ListRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("List entry", id))?;

    if entry.user_id != user.user_id {
        return Err(CoreError::forbidden("You do not own this record").into());
    }

    ListRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
