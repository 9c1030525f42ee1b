//! Rating handlers. Submission is an upsert on (caller, title).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use movies_db::models::rating::{Rating, RatingFilter, RatingWithTitle, UpsertRating};
use movies_db::repositories::{RatingRepo, TitleRepo};
use serde::Deserialize;
use tracker_core::error::CoreError;
use tracker_core::page::{Page, PageRequest};
use tracker_core::types::DbId;
use tracker_web::{AppResult, AuthUser};

use crate::state::AppState;

const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 10;

#[derive(Debug, Deserialize)]
pub struct RatingListQuery {
    pub title_id: Option<DbId>,
    pub user_id: Option<DbId>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// `GET /ratings` — optionally filtered by title and/or rater.
pub async fn list_ratings(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(query): Query<RatingListQuery>,
) -> AppResult<Json<Page<RatingWithTitle>>> {
    let filter = RatingFilter {
        title_id: query.title_id,
        user_id: query.user_id,
    };
    let request = PageRequest::new(query.page, query.per_page);
    let (items, total) = RatingRepo::list(&state.pool, &filter, request).await?;
    Ok(Json(Page::new(items, total, request)))
}

/// `POST /ratings` — submit or replace the caller's score for a title.
pub async fn upsert_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Json(body): Json<UpsertRating>,
) -> AppResult<(StatusCode, Json<Rating>)> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&body.score) {
        return Err(CoreError::validation(format!(
            "Score must be between {MIN_SCORE} and {MAX_SCORE}"
        ))
        .into());
    }

    TitleRepo::find_by_id(&state.pool, body.title_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Title", body.title_id))?;

    let rating = RatingRepo::upsert(&state.pool, user.user_id, &body).await?;
    Ok((StatusCode::CREATED, Json(rating)))
}

/// `DELETE /ratings/{id}` — owner only.
pub async fn delete_rating(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let rating = RatingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Rating", id))?;

    if rating.user_id != user.user_id {
        return Err(CoreError::forbidden("You do not own this record").into());
    }

    RatingRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
