//! Catalog title handlers. Reads are open to any authenticated user;
//! writes require the admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use movies_db::models::title::{CreateTitle, Title, TitleFilter, UpdateTitle};
use movies_db::repositories::TitleRepo;
use serde::Deserialize;
use serde_json::json;
use tracker_core::error::CoreError;
use tracker_core::page::{Page, PageRequest};
use tracker_core::types::DbId;
use tracker_web::{AppResult, AuthUser, RequireAdmin};

use crate::state::AppState;

/// Accepted values for a title's `type` field.
const TITLE_KINDS: &[&str] = &["movie", "series"];

#[derive(Debug, Deserialize)]
pub struct TitleListQuery {
    pub name: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

fn check_kind(kind: Option<&str>) -> Result<(), CoreError> {
    match kind {
        Some(k) if !TITLE_KINDS.contains(&k) => Err(CoreError::validation(format!(
            "Type must be one of: {}",
            TITLE_KINDS.join(", ")
        ))),
        _ => Ok(()),
    }
}

/// `GET /titles` with conjunctive filters and pagination.
pub async fn list_titles(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TitleListQuery>,
) -> AppResult<Json<Page<Title>>> {
    let filter = TitleFilter {
        name: query.name,
        genre: query.genre,
        year: query.year,
        status: query.status,
    };
    let request = PageRequest::new(query.page, query.per_page);
    let (items, total) = TitleRepo::list(&state.pool, &filter, user.user_id, request).await?;
    Ok(Json(Page::new(items, total, request)))
}

/// `POST /titles` (admin) — 201 `{id}`.
pub async fn create_title(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(body): Json<CreateTitle>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if body.name.trim().is_empty() {
        return Err(CoreError::validation("Name must not be empty").into());
    }
    check_kind(body.kind.as_deref())?;

    let title = TitleRepo::create(&state.pool, &body).await?;
    tracing::info!(title_id = title.id, name = %title.name, "title created");
    Ok((StatusCode::CREATED, Json(json!({ "id": title.id }))))
}

/// `GET /titles/{id}`.
pub async fn get_title(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Title>> {
    let title = TitleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Title", id))?;
    Ok(Json(title))
}

/// `PUT /titles/{id}` (admin) — partial update.
pub async fn update_title(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateTitle>,
) -> AppResult<Json<Title>> {
    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return Err(CoreError::validation("Name must not be empty").into());
        }
    }
    check_kind(body.kind.as_deref())?;

    let title = TitleRepo::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| CoreError::not_found("Title", id))?;
    Ok(Json(title))
}

/// `DELETE /titles/{id}` (admin) — 204; personal records cascade.
pub async fn delete_title(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !TitleRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Title", id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
