//! The authenticated caller's own profile.

use axum::extract::State;
use axum::Json;
use recipes_db::models::user::UserResponse;
use recipes_db::repositories::UserRepo;
use tracker_core::error::CoreError;
use tracker_web::{AppResult, AuthUser};

use crate::state::AppState;

/// `GET /profile`.
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    // The token may outlive the account.
    let row = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| CoreError::not_found("User", user.user_id))?;
    Ok(Json(row.into()))
}
