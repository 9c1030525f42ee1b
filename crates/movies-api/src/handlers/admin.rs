//! Admin-only bulk catalog import.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracker_web::{AppResult, RequireAdmin};

use crate::state::AppState;
use crate::tmdb;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct LoadMoviesRequest {
    pub page: Option<i64>,
    pub limit: Option<usize>,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default, rename = "async")]
    pub run_async: bool,
}

/// `POST /admin/load_movies`.
///
/// `dry_run` returns the fetched movies without writing; `async` kicks the
/// import off in a background task and answers 202 immediately, with the
/// outcome going to the log.
pub async fn load_movies(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(body): Json<LoadMoviesRequest>,
) -> AppResult<Response> {
    let page = body.page.unwrap_or(1).max(1);
    let limit = body.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    if body.dry_run {
        let items = tmdb::fetch_popular(page, limit).await?;
        return Ok(Json(json!({ "fetched": items.len(), "items": items })).into_response());
    }

    if body.run_async {
        let pool = state.pool.clone();
        tracing::info!(admin_id = admin.user_id, page, limit, "background movie load started");
        tokio::spawn(async move {
            match tmdb::load_movies(&pool, page, limit).await {
                Ok(inserted) => {
                    tracing::info!(inserted, "background movie load finished");
                }
                Err(err) => {
                    tracing::error!(error = ?err, "background movie load failed");
                }
            }
        });
        return Ok((StatusCode::ACCEPTED, Json(json!({ "started": true }))).into_response());
    }

    let inserted = tmdb::load_movies(&state.pool, page, limit).await?;
    tracing::info!(admin_id = admin.user_id, inserted, "movie load finished");
    Ok(Json(json!({ "inserted": inserted })).into_response())
}
