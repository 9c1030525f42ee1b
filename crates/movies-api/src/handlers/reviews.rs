//! Review handlers. Submission is an upsert on (caller, title).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use movies_db::models::review::{Review, ReviewFilter, ReviewWithTitle, UpsertReview};
use movies_db::repositories::{ReviewRepo, TitleRepo};
use serde::Deserialize;
use tracker_core::error::CoreError;
use tracker_core::page::{Page, PageRequest};
use tracker_core::types::DbId;
use tracker_web::{AppResult, AuthUser};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    pub title_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// `GET /reviews` — optionally filtered by title and/or author.
pub async fn list_reviews(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<ReviewListQuery>,
) -> AppResult<Json<Page<ReviewWithTitle>>> {
    let filter = ReviewFilter {
        title_id: query.title_id,
        user_id: query.user_id,
    };
    let request = PageRequest::new(query.page, query.per_page);
    let (items, total) = ReviewRepo::list(&state.pool, &filter, request).await?;
    Ok(Json(Page::new(items, total, request)))
}

/// `POST /reviews` — submit or replace the caller's review for a title.
pub async fn upsert_review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<UpsertReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    if body.text.trim().is_empty() {
        return Err(CoreError::validation("Review text must not be empty").into());
    }

    TitleRepo::find_by_id(&state.pool, body.title_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Title", body.title_id))?;

    let review = ReviewRepo::upsert(&state.pool, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// `DELETE /reviews/{id}` — owner only.
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Review", id))?;

    if review.user_id != user.user_id {
        return Err(CoreError::forbidden("You do not own this record").into());
    }

    ReviewRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
